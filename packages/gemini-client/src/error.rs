//! Error types for the Gemini client.
//!
//! Rate limiting and overload are their own variants because callers
//! handle them differently: a 429 means the whole account is throttled,
//! a 503 means this one call can be retried after a pause.

use thiserror::Error;

/// Result type for Gemini client operations.
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Gemini client errors.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Configuration error (missing API key)
    #[error("Configuration error: {0}")]
    Config(String),

    /// 429: quota exhausted for the account or key
    #[error("Gemini rate limit exceeded: {message}")]
    RateLimited { message: String },

    /// 503: model temporarily overloaded
    #[error("Gemini model overloaded: {message}")]
    Overloaded { message: String },

    /// Any other non-2xx response
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Parse error (unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl GeminiError {
    /// Classify a non-success HTTP status into an error variant.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            429 => GeminiError::RateLimited { message },
            503 => GeminiError::Overloaded { message },
            _ => GeminiError::Api { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            GeminiError::from_status(429, "quota".into()),
            GeminiError::RateLimited { .. }
        ));
        assert!(matches!(
            GeminiError::from_status(503, "busy".into()),
            GeminiError::Overloaded { .. }
        ));
        assert!(matches!(
            GeminiError::from_status(400, "bad".into()),
            GeminiError::Api { status: 400, .. }
        ));
    }
}
