//! Unique photo selection by randomized sampling.
//!
//! There is no pagination state: each attempt draws a random category and
//! page, asks for the first result, and checks it against the seen set.
//! Never finding anything new within the bound is a normal outcome.

use rand::Rng;
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::time::Duration;
use tracing::{info, warn};

use crate::retry::RetryPolicy;
use crate::traits::BasePhotoSource;
use crate::types::PhotoRecord;

/// Search vocabulary; one term is drawn per attempt.
const CATEGORIES: &[&str] = &[
    "nature",
    "mountains",
    "ocean",
    "forest",
    "city",
    "sky",
    "travel",
    "architecture",
    "animals",
    "flowers",
    "minimal",
    "sunset",
];

const PAGE_RANGE: RangeInclusive<u32> = 1..=50;
const SELECT_ATTEMPTS: u32 = 30;
const SELECT_DELAY: Duration = Duration::from_secs(3);

pub struct PhotoSelector {
    policy: RetryPolicy,
}

impl PhotoSelector {
    pub fn new() -> Self {
        Self {
            policy: RetryPolicy::new(SELECT_ATTEMPTS, SELECT_DELAY),
        }
    }

    /// Override the attempt bound and inter-attempt delay.
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sample random category/page pairs until a photo whose id is not in
    /// `seen` turns up. `None` after the attempt bound means "skip this
    /// run", not an error.
    pub async fn select(
        &self,
        source: &dyn BasePhotoSource,
        seen: &HashSet<String>,
    ) -> Option<PhotoRecord> {
        for attempt in self.policy.attempts() {
            // ThreadRng is not Send; scope it away from the await.
            let (query, page) = {
                let mut rng = rand::thread_rng();
                (
                    CATEGORIES[rng.gen_range(0..CATEGORIES.len())],
                    rng.gen_range(PAGE_RANGE),
                )
            };

            match source.first_match(query, page).await {
                Ok(Some(photo)) if !seen.contains(&photo.id) => {
                    info!(id = %photo.id, query, page, attempt, "Found unposted photo");
                    return Some(photo);
                }
                Ok(Some(photo)) => {
                    info!(id = %photo.id, attempt, "Photo already posted, sampling again");
                }
                Ok(None) => {
                    info!(query, page, attempt, "No results for this page");
                }
                Err(e) => {
                    warn!(error = %e, attempt, "Photo search failed");
                }
            }

            if attempt < self.policy.max_attempts {
                self.policy.pause().await;
            }
        }

        warn!(
            attempts = self.policy.max_attempts,
            "No unposted photo found"
        );
        None
    }
}

impl Default for PhotoSelector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    fn record(id: &str) -> PhotoRecord {
        PhotoRecord {
            id: id.into(),
            analysis_url: format!("https://example.com/{}/s.jpg", id),
            original_url: format!("https://example.com/{}/o.jpg", id),
            photographer: "Jane".into(),
        }
    }

    fn fast() -> PhotoSelector {
        PhotoSelector::new().with_policy(RetryPolicy::new(5, Duration::ZERO))
    }

    /// Replays a fixed sequence of responses, then empty pages.
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<Option<PhotoRecord>>>>,
        calls: AtomicU32,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Option<PhotoRecord>>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl BasePhotoSource for ScriptedSource {
        async fn first_match(&self, _query: &str, _page: u32) -> Result<Option<PhotoRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(None))
        }
    }

    #[tokio::test]
    async fn test_first_unseen_photo_wins() {
        let source = ScriptedSource::new(vec![
            Ok(Some(record("100"))),
            Ok(Some(record("101"))),
        ]);
        let seen: HashSet<String> = ["100".to_string()].into();

        let picked = fast().select(&source, &seen).await;
        assert_eq!(picked.unwrap().id, "101");
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_duplicate_only_corpus_exhausts_the_bound() {
        let source = ScriptedSource::new(
            (0..10).map(|_| Ok(Some(record("100")))).collect(),
        );
        let seen: HashSet<String> = ["100".to_string()].into();

        let picked = fast().select(&source, &seen).await;
        assert!(picked.is_none());
        assert_eq!(source.calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_errors_and_empty_pages_are_skipped() {
        let source = ScriptedSource::new(vec![
            Err(anyhow::anyhow!("search failed")),
            Ok(None),
            Ok(Some(record("200"))),
        ]);

        let picked = fast().select(&source, &HashSet::new()).await;
        assert_eq!(picked.unwrap().id, "200");
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_corpus_returns_none() {
        let source = ScriptedSource::new(vec![]);
        let picked = fast().select(&source, &HashSet::new()).await;
        assert!(picked.is_none());
    }
}
