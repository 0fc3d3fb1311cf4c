// src/error.rs
//! Application error types with structured error handling.
//!
//! Configuration and rendering failures are fatal and stop the run before
//! anything is sent. Delivery failures are local to one channel: they are
//! carried as [`DeliveryFailure`] values, counted, and never abort the
//! remaining deliveries.

use crate::types::ValidationError;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ValidationError),

    #[error("template error: {message}")]
    Template { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    DeliveryFailed(#[from] DeliveryFailure),
}

impl AppError {
    /// Whether this error stems from bad configuration input.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<handlebars::TemplateError> for AppError {
    fn from(err: handlebars::TemplateError) -> Self {
        AppError::Template {
            message: err.to_string(),
        }
    }
}

impl From<handlebars::RenderError> for AppError {
    fn from(err: handlebars::RenderError) -> Self {
        AppError::Template {
            message: err.to_string(),
        }
    }
}

/// Why a single channel failed to receive the announcement.
///
/// Each variant names the layer the failure came from, so a log line tells
/// you whether the request never left, never arrived, or was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The request could not be built from the message.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Connection refused, timeout, DNS or TLS failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a status outside 2xx.
    #[error("error response: {status_line}")]
    ErrorResponse { status_line: String },
}

/// A failed delivery to one channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{channel} failed: {cause}")]
pub struct DeliveryFailure {
    pub channel: String,
    pub cause: FailureCause,
}

impl DeliveryFailure {
    pub fn new(channel: impl Into<String>, cause: FailureCause) -> Self {
        Self {
            channel: channel.into(),
            cause,
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
