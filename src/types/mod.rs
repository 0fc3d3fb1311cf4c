use thiserror::Error;

mod domain_types;

pub use domain_types::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("template missing message placeholder")]
    MissingPlaceholder,
}
