//! Catalog error types

use thiserror::Error;

/// Errors from fetching or decoding search results
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport failure (connect, timeout, body read)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("search API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body is not a result set
    #[error("failed to decode search results: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Fixture file could not be read
    #[error("failed to read fixture: {0}")]
    Io(#[from] std::io::Error),
}
