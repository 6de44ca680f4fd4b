//! This module defines the shared state handed to the router and every workflow.

use crate::bible::catalog::{Translation, TranslationCatalog, TranslationTable};
use crate::bible::fetcher::{RetryPolicy, VerseFetcher};
use crate::bible::provider::{SourceError, TranslationSource};
use crate::bible::response::ReplyLayout;
use crate::constants::reply_footer;
use crate::database::BotStore;
use crate::reddit::Platform;
use std::sync::Arc;
use tracing::warn;

/// The central, shared state of the bot. Built once in `main` (or a test) and passed by
/// reference to everything that handles a message.
pub struct AppState {
    pub platform: Arc<dyn Platform>,
    pub store: Arc<dyn BotStore>,
    pub source: Arc<dyn TranslationSource>,
    /// Starts empty; `refresh_catalog` must succeed once before messages are handled.
    pub catalog: TranslationCatalog,
    pub fetcher: VerseFetcher,
    pub layout: ReplyLayout,
    /// Account that receives forwarded messages.
    pub admin: String,
}

/// The knobs `AppState::new` needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct StateOptions {
    pub admin: String,
    pub default_translation: String,
    pub max_reply_length: usize,
    pub retry: RetryPolicy,
}

impl AppState {
    pub fn new(
        platform: Arc<dyn Platform>,
        store: Arc<dyn BotStore>,
        source: Arc<dyn TranslationSource>,
        options: StateOptions,
    ) -> Self {
        let layout = ReplyLayout {
            max_length: options.max_reply_length,
            footer: reply_footer(platform.username(), &options.admin),
        };
        Self {
            fetcher: VerseFetcher::new(source.clone(), options.retry),
            catalog: TranslationCatalog::new(TranslationTable::default(), &options.default_translation),
            platform,
            store,
            source,
            layout,
            admin: options.admin,
        }
    }

    /// Re-fetch the translation list and archive it. Archiving is best effort.
    pub async fn refresh_catalog(&self) -> Result<Arc<TranslationTable>, SourceError> {
        let table = self.catalog.refresh(self.source.as_ref()).await?;
        let mut listing: Vec<Translation> = table.iter().cloned().collect();
        listing.sort_by(|a, b| a.code.cmp(&b.code));
        if let Err(e) = self.store.save_translations(&listing).await {
            warn!(target = "catalog", error = %e, "failed to archive translation list");
        }
        Ok(table)
    }
}
