// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only: each wraps one external surface
// (photo search, caption model, download, publishing) so a run can be
// exercised against in-memory fakes.
//
// Naming convention: Base* for trait names (e.g., BasePhotoSource)

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::types::PhotoRecord;

#[async_trait]
pub trait BasePhotoSource: Send + Sync {
    /// First photo of the given search page, if the page has any.
    async fn first_match(&self, query: &str, page: u32) -> Result<Option<PhotoRecord>>;
}

/// Caption model failure, tagged with the kind the caption loop branches
/// on. Rate limits are account-wide; overload is per-call.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("model overloaded: {0}")]
    Overloaded(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait BaseCaptionModel: Send + Sync {
    /// Generate caption text for an image. An empty string is a valid
    /// (retryable) response.
    async fn generate(
        &self,
        model: &str,
        image: &[u8],
        prompt: &str,
    ) -> std::result::Result<String, ModelError>;
}

#[async_trait]
pub trait BaseMediaFetcher: Send + Sync {
    /// Download `url` to `dest`, overwriting any existing file.
    async fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

#[async_trait]
pub trait BasePublisher: Send + Sync {
    /// Lightweight auth and connectivity check ("who am I").
    async fn verify(&self) -> Result<()>;

    /// Upload the media file, then post `text` referencing it. Returns
    /// the created post id. Not atomic: an upload can succeed and the
    /// post still fail, which counts as a failed publish.
    async fn publish(&self, text: &str, media: &Path) -> Result<String>;
}
