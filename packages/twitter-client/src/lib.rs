//! X/Twitter API client.
//!
//! Covers the three calls a posting bot needs: credential check
//! (`GET /2/users/me`), media upload (v1.1 `media/upload.json`), and tweet
//! creation (`POST /2/tweets`). All requests are signed with OAuth 1.0a
//! user context.
//!
//! # Example
//!
//! ```rust,ignore
//! use twitter_client::{TwitterClient, TwitterOptions};
//!
//! let client = TwitterClient::new(TwitterOptions { .. });
//!
//! let me = client.verify_credentials().await?;
//! let media_id = client.upload_media(Path::new("photo.jpg")).await?;
//! let tweet = client.create_tweet("caption", vec![media_id]).await?;
//! ```

pub mod error;
pub mod oauth;
pub mod types;

pub use error::{Result, TwitterError};
pub use oauth::OAuth1Credentials;
pub use types::{MediaUploadResponse, Tweet, TwitterUser};

use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};
use types::{CreateTweetRequest, TweetMedia, TweetResponse, UserResponse};

const API_BASE_URL: &str = "https://api.twitter.com";
const UPLOAD_URL: &str = "https://upload.twitter.com/1.1/media/upload.json";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Credentials for one posting account.
#[derive(Debug, Clone)]
pub struct TwitterOptions {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

#[derive(Clone)]
pub struct TwitterClient {
    http_client: reqwest::Client,
    credentials: OAuth1Credentials,
}

impl TwitterClient {
    pub fn new(options: TwitterOptions) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            credentials: OAuth1Credentials {
                consumer_key: options.consumer_key,
                consumer_secret: options.consumer_secret,
                access_token: options.access_token,
                access_token_secret: options.access_token_secret,
            },
        }
    }

    /// Lightweight "who am I" call to confirm connectivity and auth.
    pub async fn verify_credentials(&self) -> Result<TwitterUser> {
        let url = format!("{}/2/users/me", API_BASE_URL);
        let auth = self.credentials.authorization_header("GET", &url, &[]);

        let resp = self
            .http_client
            .get(&url)
            .header("Authorization", auth)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Credential check failed");
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let user: UserResponse = resp
            .json()
            .await
            .map_err(|e| TwitterError::Parse(e.to_string()))?;
        debug!(username = %user.data.username, "Twitter credentials verified");
        Ok(user.data)
    }

    /// Upload a local media file, returning the media id to attach to a
    /// tweet. Uses the v1.1 simple upload (single multipart request).
    pub async fn upload_media(&self, path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "media".to_string());

        // Multipart bodies are not form-encoded, so only the oauth_*
        // parameters enter the signature.
        let auth = self.credentials.authorization_header("POST", UPLOAD_URL, &[]);

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("media", part);

        let resp = self
            .http_client
            .post(UPLOAD_URL)
            .header("Authorization", auth)
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Media upload failed");
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let upload: MediaUploadResponse = resp
            .json()
            .await
            .map_err(|e| TwitterError::Parse(e.to_string()))?;
        debug!(media_id = %upload.media_id_string, "Media uploaded");
        Ok(upload.media_id_string)
    }

    /// Post a tweet with optional attached media.
    pub async fn create_tweet(&self, text: &str, media_ids: Vec<String>) -> Result<Tweet> {
        let url = format!("{}/2/tweets", API_BASE_URL);
        // JSON body, so the signature again covers only the oauth_* set.
        let auth = self.credentials.authorization_header("POST", &url, &[]);

        let request = CreateTweetRequest {
            text: text.to_string(),
            media: if media_ids.is_empty() {
                None
            } else {
                Some(TweetMedia { media_ids })
            },
        };

        let resp = self
            .http_client
            .post(&url)
            .header("Authorization", auth)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Tweet creation failed");
            return Err(TwitterError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let tweet: TweetResponse = resp
            .json()
            .await
            .map_err(|e| TwitterError::Parse(e.to_string()))?;
        debug!(tweet_id = %tweet.data.id, "Tweet posted");
        Ok(tweet.data)
    }
}
