//! Pure Pexels REST API client.
//!
//! A minimal client for the Pexels photo API. Supports keyword search and
//! the curated feed, one page at a time.
//!
//! # Example
//!
//! ```rust,ignore
//! use pexels_client::PexelsClient;
//!
//! let client = PexelsClient::new("your-api-key".into());
//!
//! let page = client.search("nature", 1, 3).await?;
//! for photo in &page.photos {
//!     println!("{} by {}", photo.id, photo.photographer);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{PexelsError, Result};
pub use types::{Photo, PhotoPage, PhotoSrc};

use std::time::Duration;

const BASE_URL: &str = "https://api.pexels.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct PexelsClient {
    client: reqwest::Client,
    api_key: String,
}

impl PexelsClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key,
        }
    }

    /// Search photos by keyword. Returns one page of results.
    pub async fn search(&self, query: &str, page: u32, per_page: u32) -> Result<PhotoPage> {
        let url = format!("{}/search", BASE_URL);
        let page = page.to_string();
        let per_page = per_page.to_string();
        let resp = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query),
                ("page", page.as_str()),
                ("per_page", per_page.as_str()),
            ])
            .send()
            .await?;

        self.read_page(resp).await
    }

    /// Fetch a page of the curated feed (editor-picked photos).
    pub async fn curated(&self, page: u32, per_page: u32) -> Result<PhotoPage> {
        let url = format!("{}/curated", BASE_URL);
        let page = page.to_string();
        let per_page = per_page.to_string();
        let resp = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[("page", page.as_str()), ("per_page", per_page.as_str())])
            .send()
            .await?;

        self.read_page(resp).await
    }

    async fn read_page(&self, resp: reqwest::Response) -> Result<PhotoPage> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Pexels API error");
            return Err(PexelsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| PexelsError::Parse(e.to_string()))
    }
}
