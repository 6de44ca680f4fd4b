//! Verse text retrieval with bounded retries.
//!
//! Callers only ever see "text" or "not found": a provider that keeps failing after the
//! retry budget is treated the same as a missing passage, so one bad lookup cannot hold
//! up the rest of a reply.

use super::provider::{Passage, TranslationSource};
use super::verse::{ResolvedVerse, VerseText};
use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub multiplier: f64,
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(8),
            multiplier: 2.0,
            attempt_timeout: Duration::from_secs(20),
        }
    }
}

pub struct VerseFetcher {
    source: Arc<dyn TranslationSource>,
    retry: RetryPolicy,
}

impl VerseFetcher {
    pub fn new(source: Arc<dyn TranslationSource>, retry: RetryPolicy) -> Self {
        Self { source, retry }
    }

    #[instrument(level = "debug", skip_all, fields(reference = %verse.reference(), translation = %verse.translation))]
    pub async fn fetch(&self, verse: &ResolvedVerse) -> Option<VerseText> {
        let passage = Passage {
            book: verse.book,
            chapter: verse.chapter,
            verses: verse.verses,
            translation: &verse.translation,
        };
        let mut backoff = ExponentialBackoff {
            current_interval: self.retry.initial_interval,
            initial_interval: self.retry.initial_interval,
            max_interval: self.retry.max_interval,
            multiplier: self.retry.multiplier,
            max_elapsed_time: None,
            ..Default::default()
        };
        backoff.reset();

        for attempt in 0..=self.retry.max_retries {
            let error = match timeout(self.retry.attempt_timeout, self.source.lookup(passage)).await {
                Ok(Ok(Some(text))) => {
                    return Some(VerseText {
                        verse: verse.clone(),
                        text,
                    });
                }
                Ok(Ok(None)) => {
                    debug!(target = "fetch", "passage not found");
                    return None;
                }
                Ok(Err(e)) => e.to_string(),
                Err(_) => "lookup timed out".to_string(),
            };
            if attempt == self.retry.max_retries {
                warn!(target = "fetch", attempts = attempt + 1, %error, "giving up on passage");
                break;
            }
            let wait = backoff
                .next_backoff()
                .unwrap_or(self.retry.max_interval);
            warn!(target = "fetch", attempt = attempt + 1, %error, ?wait, "lookup failed, retrying");
            tokio::time::sleep(wait).await;
        }
        None
    }
}
