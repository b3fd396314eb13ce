//! One full post cycle, start to finish.
//!
//! The walk is strictly sequential: verify publisher credentials, snapshot
//! the ledger, select an unposted photo, download both resolutions,
//! generate the caption, publish, record the id. Any failure short-circuits
//! the rest; temp files are removed in every case. The id is recorded only
//! after the publish call reports success, so a failed run never marks a
//! photo as used.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::caption::CaptionWriter;
use crate::deps::BotDeps;
use crate::ledger::Ledger;
use crate::selector::PhotoSelector;
use crate::types::{PhotoRecord, RunOutcome};

pub struct Runner {
    deps: BotDeps,
    ledger: Ledger,
    selector: PhotoSelector,
    writer: CaptionWriter,
    analysis_path: PathBuf,
    publish_path: PathBuf,
}

impl Runner {
    pub fn new(
        deps: BotDeps,
        ledger: Ledger,
        analysis_path: impl Into<PathBuf>,
        publish_path: impl Into<PathBuf>,
    ) -> Self {
        let writer = CaptionWriter::new(deps.model.clone());
        Self {
            deps,
            ledger,
            selector: PhotoSelector::new(),
            writer,
            analysis_path: analysis_path.into(),
            publish_path: publish_path.into(),
        }
    }

    /// Override the photo selector (tests use a zero-delay policy).
    pub fn with_selector(mut self, selector: PhotoSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Override the caption writer.
    pub fn with_writer(mut self, writer: CaptionWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Execute one run. Failures are logged and absorbed here; the
    /// scheduler never sees an error.
    pub async fn run(&self) -> RunOutcome {
        info!("Starting post cycle");

        let outcome = match self.execute().await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = ?e, "Post cycle aborted");
                RunOutcome::Skipped
            }
        };

        self.cleanup();

        match &outcome {
            RunOutcome::Posted { tweet_id, photo_id } => {
                info!(tweet_id = %tweet_id, photo_id = %photo_id, "Post cycle complete");
            }
            RunOutcome::Skipped => {
                info!("Post cycle skipped");
            }
        }
        outcome
    }

    async fn execute(&self) -> Result<RunOutcome> {
        // Publisher first: without working credentials the rest of the
        // cycle would only burn photo API quota.
        let Some(publisher) = &self.deps.publisher else {
            warn!("Publisher credentials not configured, skipping cycle");
            return Ok(RunOutcome::Skipped);
        };
        publisher
            .verify()
            .await
            .context("Publisher credential check failed")?;

        let seen = self.ledger.snapshot();
        info!(posted = seen.len(), "Ledger loaded");

        let Some(photo) = self.selector.select(self.deps.source.as_ref(), &seen).await else {
            return Ok(RunOutcome::Skipped);
        };

        self.download(&photo).await?;

        let caption = self.writer.compose(&photo, &self.analysis_path).await;
        info!(chars = caption.chars().count(), "Caption ready");

        let tweet_id = publisher
            .publish(&caption, &self.publish_path)
            .await
            .context("Publish failed")?;

        // Only now is the photo considered used.
        self.ledger.record(&photo.id);

        Ok(RunOutcome::Posted {
            tweet_id,
            photo_id: photo.id,
        })
    }

    async fn download(&self, photo: &PhotoRecord) -> Result<()> {
        self.deps
            .fetcher
            .fetch(&photo.analysis_url, &self.analysis_path)
            .await
            .context("Analysis image download failed")?;
        self.deps
            .fetcher
            .fetch(&photo.original_url, &self.publish_path)
            .await
            .context("Original image download failed")?;
        Ok(())
    }

    /// Remove both temp files. Idempotent: missing files are fine, and
    /// removal errors are not worth failing over.
    fn cleanup(&self) {
        for path in [&self.analysis_path, &self.publish_path] {
            if let Err(e) = std::fs::remove_file(path) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %path.display(), error = %e, "Could not remove temp file");
                }
            }
        }
    }
}
