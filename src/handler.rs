//! The inbox loop: classify each unread item by subject and hand it to its workflow.

use crate::constants::PROCESSED_RETENTION_DAYS;
use crate::reddit::InboxMessage;
use crate::services::cache::cache_stats;
use crate::{AppState, commands};
use chrono::Utc;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, instrument, warn};

const PRUNE_EVERY: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    UsernameMention,
    EditRequest,
    DeleteRequest,
    UserTranslationDefault,
    SubredditTranslationDefault,
    Unrecognized,
}

impl FromStr for Intent {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "username mention" => Ok(Intent::UsernameMention),
            "edit request" => Ok(Intent::EditRequest),
            "delete request" => Ok(Intent::DeleteRequest),
            "user translation default request" => Ok(Intent::UserTranslationDefault),
            "subreddit translation default request" => Ok(Intent::SubredditTranslationDefault),
            _ => Ok(Intent::Unrecognized),
        }
    }
}

impl Intent {
    pub fn from_subject(subject: &str) -> Self {
        Intent::from_str(subject).unwrap_or(Intent::Unrecognized)
    }
}

/// What the router did with one inbox item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Not addressed to the bot; left unread.
    Ignored,
    /// The ledger already had it; only marked read.
    AlreadyProcessed,
    /// The workflow ran (successfully or not) and the item was marked read.
    Handled,
    /// The ledger could not be reached; left unread for the next poll.
    Deferred,
}

#[instrument(level = "info", skip_all, fields(message = %message.name, author = message.author()))]
pub async fn process_message(state: &AppState, message: &InboxMessage) -> Disposition {
    let intent = Intent::from_subject(&message.subject);
    if intent == Intent::Unrecognized {
        debug!(target = "router", subject = %message.subject, "unrecognized subject, leaving unread");
        return Disposition::Ignored;
    }

    let disposition = match state.store.claim(&message.name).await {
        Ok(true) => {
            if let Err(e) = dispatch(state, intent, message).await {
                warn!(target = "router", ?intent, error = %e, "workflow failed");
            }
            Disposition::Handled
        }
        Ok(false) => {
            debug!(target = "router", ?intent, "already processed");
            Disposition::AlreadyProcessed
        }
        Err(e) => {
            warn!(target = "router", error = %e, "processed-message ledger unavailable");
            return Disposition::Deferred;
        }
    };

    if let Err(e) = state.platform.mark_read(message).await {
        warn!(target = "router", error = %e, "failed to mark message read");
    }
    disposition
}

async fn dispatch(
    state: &AppState,
    intent: Intent,
    message: &InboxMessage,
) -> Result<(), commands::WorkflowError> {
    match intent {
        Intent::UsernameMention => commands::mention::run(state, message).await,
        Intent::EditRequest => commands::edit::run(state, message).await,
        Intent::DeleteRequest => commands::delete::run(state, message).await,
        Intent::UserTranslationDefault => commands::translation::run_user(state, message).await,
        Intent::SubredditTranslationDefault => {
            commands::translation::run_subreddit(state, message).await
        }
        Intent::Unrecognized => Ok(()),
    }
}

/// Fetch the unread inbox once and process it in order. Returns how many items were handled.
pub async fn poll_once(state: &AppState) -> usize {
    let messages = match state.platform.unread().await {
        Ok(messages) => messages,
        Err(e) => {
            warn!(target = "router", error = %e, "failed to fetch unread messages");
            return 0;
        }
    };
    let mut handled = 0;
    for message in &messages {
        if process_message(state, message).await == Disposition::Handled {
            handled += 1;
        }
    }
    handled
}

/// Loop timing.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    pub poll_interval: Duration,
    /// `None` keeps the startup translation list for the life of the process.
    pub catalog_refresh: Option<Duration>,
}

/// Poll until Ctrl-C. Shutdown is only observed between polls.
pub async fn run(state: &AppState, schedule: Schedule) {
    info!(target = "router", interval = ?schedule.poll_interval, "scanning inbox");
    let mut last_refresh = Instant::now();
    let mut last_prune: Option<Instant> = None;
    loop {
        let handled = poll_once(state).await;
        if handled > 0 {
            info!(target = "router", handled, "inbox pass complete");
        }

        if let Some(every) = schedule.catalog_refresh
            && last_refresh.elapsed() >= every
        {
            if let Err(e) = state.refresh_catalog().await {
                warn!(target = "catalog", error = %e, "refresh failed, keeping previous list");
            }
            last_refresh = Instant::now();
        }

        if last_prune.is_none_or(|at| at.elapsed() >= PRUNE_EVERY) {
            let cutoff = Utc::now() - chrono::Duration::days(PROCESSED_RETENTION_DAYS);
            match state.store.prune(cutoff).await {
                Ok(removed) => debug!(target = "router", removed, "pruned processed-message ledger"),
                Err(e) => warn!(target = "router", error = %e, "failed to prune ledger"),
            }
            let (hits, misses) = cache_stats();
            info!(target = "cache.preferences", hits, misses, "preference cache counters");
            last_prune = Some(Instant::now());
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!(target = "router", "shutdown requested");
                break;
            }
            _ = sleep(schedule.poll_interval) => {}
        }
    }
}
