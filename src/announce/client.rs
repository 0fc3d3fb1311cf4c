// src/announce/client.rs
//! The shared HTTP client every announcer sends through.

use crate::constants::USER_AGENT;
use crate::error::AppError;
use reqwest::{header, Client};
use std::time::Duration;

/// Creates the HTTP client used for webhook delivery.
///
/// The timeout bounds each request; webhooks carry their own credentials in
/// the URL, so no authentication headers are set.
pub fn build_http_client(timeout: Duration) -> Result<Client, AppError> {
    let client = Client::builder()
        .default_headers(create_headers())
        .timeout(timeout)
        .build()?;
    Ok(client)
}

fn create_headers() -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_static(USER_AGENT),
    );
    headers
}
