//! Caption generation: model ladder with retries, hard length budgeting,
//! and a deterministic static fallback.
//!
//! The contract is simple: whatever happens upstream, `compose` returns a
//! post text of at most [`PLATFORM_LIMIT`] characters, ending in the
//! attribution footer when a model produced the body.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::retry::RetryPolicy;
use crate::traits::{BaseCaptionModel, ModelError};
use crate::types::PhotoRecord;

/// Hard per-post character limit on the platform.
pub const PLATFORM_LIMIT: usize = 280;

/// Marker appended when generated text had to be cut.
const ELLIPSIS: char = '…';

/// Models to try, fastest first.
const MODEL_LADDER: &[&str] = &["gemini-2.5-flash", "gemini-2.5-pro"];

const MODEL_ATTEMPTS: u32 = 3;
const OVERLOAD_DELAY: Duration = Duration::from_secs(15);

/// The budget margin lives here, in the instruction, not in the
/// truncation arithmetic.
const PROMPT: &str = "Generate a single, short caption for this photo. \
    Start with a highly engaging opening phrase that stops the scroll \
    (e.g. 'WAIT!', 'Moment of calm:', 'Take a deep breath:'). \
    Include one thoughtful question and at most 3 relevant hashtags. \
    Keep the entire text under 200 characters; an attribution footer is \
    appended separately.";

pub struct CaptionWriter {
    model: Option<Arc<dyn BaseCaptionModel>>,
    ladder: Vec<String>,
    policy: RetryPolicy,
}

impl CaptionWriter {
    pub fn new(model: Option<Arc<dyn BaseCaptionModel>>) -> Self {
        Self {
            model,
            ladder: MODEL_LADDER.iter().map(|m| m.to_string()).collect(),
            policy: RetryPolicy::new(MODEL_ATTEMPTS, OVERLOAD_DELAY),
        }
    }

    /// Override the per-model retry policy (attempt bound and the pause
    /// taken when the model reports overload).
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the model ladder.
    pub fn with_ladder(mut self, models: Vec<String>) -> Self {
        self.ladder = models;
        self
    }

    /// Produce the final post text for a photo.
    ///
    /// Tries each model in the ladder with bounded retries; any dead end
    /// (no model configured, unreadable image, rate limit, exhaustion)
    /// lands on the static fallback. The result never exceeds
    /// [`PLATFORM_LIMIT`] characters.
    pub async fn compose(&self, photo: &PhotoRecord, image_path: &Path) -> String {
        let footer = footer_for(photo);
        let budget = PLATFORM_LIMIT.saturating_sub(footer.chars().count());
        if budget == 0 {
            return fallback_caption(photo);
        }

        let Some(model_client) = &self.model else {
            info!("No caption model configured, using static caption");
            return fallback_caption(photo);
        };

        let image = match std::fs::read(image_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, path = %image_path.display(), "Could not read image for captioning");
                return fallback_caption(photo);
            }
        };

        for model in &self.ladder {
            info!(model = %model, "Trying caption model");

            for attempt in self.policy.attempts() {
                match model_client.generate(model, &image, PROMPT).await {
                    Ok(text) => {
                        let body = tidy(&text);
                        if body.is_empty() {
                            warn!(model = %model, attempt, "Empty caption, retrying");
                            continue;
                        }
                        let caption = finish(&body, &footer, budget);
                        info!(chars = caption.chars().count(), "Caption generated");
                        return caption;
                    }
                    Err(ModelError::RateLimited(message)) => {
                        warn!(model = %model, message = %message, "Rate limited, using static caption");
                        return fallback_caption(photo);
                    }
                    Err(ModelError::Overloaded(message)) => {
                        warn!(model = %model, attempt, message = %message, "Model overloaded, pausing before retry");
                        self.policy.pause().await;
                    }
                    Err(ModelError::Other(e)) => {
                        warn!(model = %model, error = %e, "Caption model failed, trying the next one");
                        break;
                    }
                }
            }
        }

        info!("All caption models exhausted, using static caption");
        fallback_caption(photo)
    }
}

/// Attribution suffix appended to every generated caption.
pub fn footer_for(photo: &PhotoRecord) -> String {
    format!("\n\n📸 {} #Visual", photo.photographer)
}

/// Deterministic caption used when no model output is available. Holds
/// the platform limit on its own, whatever the photographer name length.
pub fn fallback_caption(photo: &PhotoRecord) -> String {
    let text = format!(
        "STOP SCROLLING. Here is your moment of visual escape.\n\
         📌 Long press for 4K.\n\
         Photo by {} #Visual",
        photo.photographer
    );
    truncate_chars(&text, PLATFORM_LIMIT)
}

/// Strip label artifacts and wrapping markup the models are known to
/// emit around an otherwise usable caption.
fn tidy(text: &str) -> String {
    let mut s = text.trim();
    loop {
        let before = s;

        for label in ["Caption:", "caption:", "CAPTION:", "Tweet:", "tweet:"] {
            if let Some(rest) = s.strip_prefix(label) {
                s = rest.trim_start();
            }
        }

        for (open, close) in [("\"", "\""), ("\u{201c}", "\u{201d}"), ("**", "**"), ("*", "*")] {
            if s.len() > open.len() + close.len() && s.starts_with(open) && s.ends_with(close) {
                s = s[open.len()..s.len() - close.len()].trim();
            }
        }

        if s == before {
            break;
        }
    }
    s.to_string()
}

/// Cut `body` to the budget, marking any cut with an ellipsis, and attach
/// the footer.
fn finish(body: &str, footer: &str, budget: usize) -> String {
    let body = if body.chars().count() > budget {
        let mut cut = truncate_chars(body, budget.saturating_sub(1));
        cut.push(ELLIPSIS);
        cut
    } else {
        body.to_string()
    };

    truncate_chars(&format!("{}{}", body, footer), PLATFORM_LIMIT)
}

/// Truncate to at most `max` characters (not bytes).
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
