//! Bot dependencies (using traits for testability)
//!
//! Central dependency container handed to the runner. All external
//! services sit behind trait abstractions so runs can be exercised
//! against in-memory fakes.

use anyhow::{Context, Result};
use async_trait::async_trait;
use gemini_client::{GeminiClient, GeminiError};
use pexels_client::PexelsClient;
use std::path::Path;
use std::sync::Arc;
use twitter_client::{TwitterClient, TwitterOptions};

use crate::config::Config;
use crate::fetch::HttpFetcher;
use crate::traits::{
    BaseCaptionModel, BaseMediaFetcher, BasePhotoSource, BasePublisher, ModelError,
};
use crate::types::PhotoRecord;

// =============================================================================
// PexelsClient Adapter (implements BasePhotoSource trait)
// =============================================================================

/// Wrapper around PexelsClient that implements BasePhotoSource
pub struct PexelsSourceAdapter(pub Arc<PexelsClient>);

impl PexelsSourceAdapter {
    pub fn new(client: Arc<PexelsClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BasePhotoSource for PexelsSourceAdapter {
    async fn first_match(&self, query: &str, page: u32) -> Result<Option<PhotoRecord>> {
        let result = self
            .0
            .search(query, page, 1)
            .await
            .with_context(|| format!("Pexels search for '{}' page {} failed", query, page))?;

        Ok(result.photos.into_iter().next().map(|photo| PhotoRecord {
            id: photo.id.to_string(),
            analysis_url: photo.src.tiny,
            original_url: photo.src.original,
            photographer: photo.photographer,
        }))
    }
}

// =============================================================================
// GeminiClient Adapter (implements BaseCaptionModel trait)
// =============================================================================

/// Wrapper around GeminiClient that implements BaseCaptionModel
pub struct GeminiModelAdapter(pub Arc<GeminiClient>);

impl GeminiModelAdapter {
    pub fn new(client: Arc<GeminiClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseCaptionModel for GeminiModelAdapter {
    async fn generate(
        &self,
        model: &str,
        image: &[u8],
        prompt: &str,
    ) -> std::result::Result<String, ModelError> {
        self.0
            .generate_with_image(model, image, "image/jpeg", prompt)
            .await
            .map_err(|e| match e {
                GeminiError::RateLimited { message } => ModelError::RateLimited(message),
                GeminiError::Overloaded { message } => ModelError::Overloaded(message),
                other => ModelError::Other(other.into()),
            })
    }
}

// =============================================================================
// TwitterClient Adapter (implements BasePublisher trait)
// =============================================================================

/// Wrapper around TwitterClient that implements BasePublisher
pub struct TwitterPublisherAdapter(pub Arc<TwitterClient>);

impl TwitterPublisherAdapter {
    pub fn new(client: Arc<TwitterClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BasePublisher for TwitterPublisherAdapter {
    async fn verify(&self) -> Result<()> {
        self.0
            .verify_credentials()
            .await
            .map(|_| ())
            .context("Twitter credential check failed")
    }

    async fn publish(&self, text: &str, media: &Path) -> Result<String> {
        let media_id = self
            .0
            .upload_media(media)
            .await
            .context("Media upload failed")?;
        let tweet = self
            .0
            .create_tweet(text, vec![media_id])
            .await
            .context("Tweet creation failed")?;
        Ok(tweet.id)
    }
}

// =============================================================================
// BotDeps
// =============================================================================

/// Bot dependencies accessible to the runner (using traits for testability)
#[derive(Clone)]
pub struct BotDeps {
    pub source: Arc<dyn BasePhotoSource>,
    /// Absent when no caption model key is configured; captions then come
    /// from the static template only.
    pub model: Option<Arc<dyn BaseCaptionModel>>,
    pub fetcher: Arc<dyn BaseMediaFetcher>,
    /// Absent when publishing credentials are incomplete; every run then
    /// skips at the credential check.
    pub publisher: Option<Arc<dyn BasePublisher>>,
}

impl BotDeps {
    /// Wire the real clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        let source = Arc::new(PexelsSourceAdapter::new(Arc::new(PexelsClient::new(
            config.pexels_api_key.clone(),
        ))));

        let model = config.gemini_api_key.as_ref().map(|key| {
            Arc::new(GeminiModelAdapter::new(Arc::new(GeminiClient::new(
                key.clone(),
            )))) as Arc<dyn BaseCaptionModel>
        });

        let publisher = config.twitter.as_ref().map(|creds| {
            Arc::new(TwitterPublisherAdapter::new(Arc::new(TwitterClient::new(
                TwitterOptions {
                    consumer_key: creds.consumer_key.clone(),
                    consumer_secret: creds.consumer_secret.clone(),
                    access_token: creds.access_token.clone(),
                    access_token_secret: creds.access_token_secret.clone(),
                },
            )))) as Arc<dyn BasePublisher>
        });

        Self {
            source,
            model,
            fetcher: Arc::new(HttpFetcher::new()),
            publisher,
        }
    }
}
