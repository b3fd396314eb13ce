//! Streaming image downloads.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::traits::BaseMediaFetcher;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed fetcher that streams response bodies straight to disk.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(DOWNLOAD_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMediaFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", url))?;

        if !resp.status().is_success() {
            bail!("download of {} returned status {}", url, resp.status());
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .with_context(|| format!("could not create {}", dest.display()))?;

        let mut stream = resp.bytes_stream();
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.context("download stream interrupted")?;
            file.write_all(&chunk)
                .await
                .context("write to local file failed")?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(url, bytes = written, dest = %dest.display(), "Downloaded");
        Ok(())
    }
}
