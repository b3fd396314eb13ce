//! Error types for the Pexels client.

use thiserror::Error;

/// Result type for Pexels client operations.
pub type Result<T> = std::result::Result<T, PexelsError>;

/// Pexels client errors.
#[derive(Debug, Error)]
pub enum PexelsError {
    /// Non-2xx response from the Pexels API
    #[error("Pexels API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Parse error (unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}
