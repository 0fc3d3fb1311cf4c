// src/announce/response.rs
//! Converts a completed HTTP exchange into a delivery outcome.
//!
//! Shared by every channel. Only the status code decides pass or fail; the
//! body of an error response is read up to a fixed bound and logged.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::FailureCause;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use reqwest::StatusCode;
use std::fmt::Display;

/// A response as seen by the validator: its status and a stream of body chunks.
pub struct Exchange<S> {
    pub status: StatusCode,
    pub body: S,
}

/// Body stream of a live `reqwest` response.
pub type ResponseBody = BoxStream<'static, reqwest::Result<Vec<u8>>>;

impl From<reqwest::Response> for Exchange<ResponseBody> {
    /// Wraps a response without reading its body; the validator decides how
    /// much of it to pull.
    fn from(response: reqwest::Response) -> Self {
        Exchange {
            status: response.status(),
            body: response
                .bytes_stream()
                .map(|chunk| chunk.map(|bytes| bytes.to_vec()))
                .boxed(),
        }
    }
}

/// What a bounded body read produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyExcerpt {
    /// The whole body fit within the bound.
    Full(Vec<u8>),
    /// The body is longer than the bound; only the prefix was kept.
    Truncated(Vec<u8>),
    /// Reading failed; whatever arrived before the error is kept.
    ReadError { partial: Vec<u8>, error: String },
}

impl BodyExcerpt {
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Full(b) | Self::Truncated(b) => b,
            Self::ReadError { partial, .. } => partial,
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(self.bytes()).into_owned()
    }
}

/// Reads at most `limit` bytes from a body stream.
///
/// Stops pulling chunks as soon as the bound is passed, so a huge body is
/// never read in full.
pub async fn read_bounded<S, B, E>(mut body: S, limit: usize) -> BodyExcerpt
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut buf = Vec::with_capacity(limit);
    loop {
        match body.next().await {
            None => return BodyExcerpt::Full(buf),
            Some(Err(e)) => {
                return BodyExcerpt::ReadError {
                    partial: buf,
                    error: e.to_string(),
                }
            }
            Some(Ok(chunk)) => {
                let chunk = chunk.as_ref();
                let room = limit - buf.len();
                if chunk.len() > room {
                    buf.extend_from_slice(&chunk[..room]);
                    return BodyExcerpt::Truncated(buf);
                }
                buf.extend_from_slice(chunk);
            }
        }
    }
}

/// Validates the outcome of one webhook request.
pub async fn validate<S, B, E, T>(exchange: Result<Exchange<S>, T>) -> Result<(), FailureCause>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Display,
    T: Display,
{
    let exchange = exchange.map_err(|e| FailureCause::Transport(e.to_string()))?;

    if exchange.status.is_success() {
        return Ok(());
    }

    let excerpt = read_bounded(exchange.body, ERROR_BODY_PREVIEW_LENGTH).await;
    match &excerpt {
        BodyExcerpt::Full(_) => {}
        BodyExcerpt::Truncated(_) => {
            log::warn!(
                "huge error response (more than {} bytes), showing prefix only",
                ERROR_BODY_PREVIEW_LENGTH
            );
        }
        BodyExcerpt::ReadError { error, .. } => {
            log::warn!("failed reading error response: {}", error);
        }
    }
    log::info!("error response body: {}", excerpt.text());

    Err(FailureCause::ErrorResponse {
        status_line: exchange.status.to_string(),
    })
}
