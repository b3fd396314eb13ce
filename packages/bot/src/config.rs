use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub pexels_api_key: String,
    /// Absent key means captions come from the static template only.
    pub gemini_api_key: Option<String>,
    /// Absent credentials make every run skip at the credential check.
    pub twitter: Option<TwitterCredentials>,
    pub post_interval: Duration,
    pub ledger_path: PathBuf,
    pub analysis_image_path: PathBuf,
    pub publish_image_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let interval_minutes: u64 = env::var("POST_INTERVAL_MINUTES")
            .unwrap_or_else(|_| "90".to_string())
            .parse()
            .context("POST_INTERVAL_MINUTES must be a number of minutes")?;

        let tmp = env::temp_dir();

        Ok(Self {
            pexels_api_key: env::var("PEXELS_API_KEY")
                .context("PEXELS_API_KEY must be set")?,
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            twitter: TwitterCredentials::from_env(),
            post_interval: Duration::from_secs(interval_minutes * 60),
            ledger_path: env::var("LEDGER_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("posted_ids.txt")),
            analysis_image_path: tmp.join("lenspost_tiny.jpg"),
            publish_image_path: tmp.join("lenspost_original.jpg"),
        })
    }
}

impl TwitterCredentials {
    /// All four keys or nothing; a partial set counts as unconfigured.
    fn from_env() -> Option<Self> {
        Some(Self {
            consumer_key: env::var("CONSUMER_KEY").ok()?,
            consumer_secret: env::var("CONSUMER_SECRET").ok()?,
            access_token: env::var("ACCESS_TOKEN").ok()?,
            access_token_secret: env::var("ACCESS_TOKEN_SECRET").ok()?,
        })
    }
}
