//! Error types for the Twitter client.

use thiserror::Error;

/// Result type for Twitter client operations.
pub type Result<T> = std::result::Result<T, TwitterError>;

/// Twitter client errors.
#[derive(Debug, Error)]
pub enum TwitterError {
    /// Non-2xx response from the Twitter API
    #[error("Twitter API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Local I/O error while reading media for upload
    #[error("Media read error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error (unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}
