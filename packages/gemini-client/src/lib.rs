//! Pure Gemini REST API client.
//!
//! A minimal client for the Gemini `generateContent` endpoint, covering
//! multimodal prompts (inline image bytes plus an instruction).
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::new("your-api-key".into());
//!
//! let text = client
//!     .generate_with_image("gemini-2.5-flash", &jpeg_bytes, "image/jpeg", "Caption this photo")
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::{Blob, Content, GenerateContentRequest, GenerateContentResponse, Part};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use std::time::Duration;
use tracing::{debug, warn};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Generate text from an image plus an instruction prompt.
    ///
    /// Returns the first candidate's text, which may be empty when the
    /// model produced nothing; the caller decides whether to retry.
    pub async fn generate_with_image(
        &self,
        model: &str,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: Blob {
                            mime_type: mime_type.to_string(),
                            data: BASE64.encode(image),
                        },
                    },
                    Part::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
        };

        self.generate_content(model, &request).await
    }

    /// Raw generateContent call.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String> {
        let start = std::time::Instant::now();
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, model, "Gemini request failed");
                GeminiError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), model, "Gemini API error");
            return Err(GeminiError::from_status(status.as_u16(), error_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.to_string()))?;

        debug!(
            model,
            duration_ms = start.elapsed().as_millis(),
            "Gemini generateContent"
        );

        Ok(parsed.text().trim().to_string())
    }
}
