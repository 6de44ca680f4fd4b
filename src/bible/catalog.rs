//! The table of translations the bot can quote from.
//!
//! The table itself (`TranslationTable`) is immutable. `TranslationCatalog` owns the current
//! table behind an `Arc` and swaps in a whole new one on refresh, so readers holding a
//! snapshot never see a half-updated table.

use super::provider::{SourceError, TranslationSource};
use crate::database::PreferenceStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub code: String,
    pub name: String,
    pub language: Option<String>,
}

impl Translation {
    pub fn new(code: &str, name: &str, language: Option<&str>) -> Self {
        Self {
            code: code.trim().to_uppercase(),
            name: name.trim().to_string(),
            language: language.map(str::to_string),
        }
    }
}

#[derive(Debug, Default)]
pub struct TranslationTable {
    by_code: HashMap<String, Translation>,
}

impl TranslationTable {
    /// Builds a table keyed by upper-cased code. If the listing repeats a code, the first
    /// entry wins.
    pub fn new(translations: impl IntoIterator<Item = Translation>) -> Self {
        let mut by_code = HashMap::new();
        for t in translations {
            by_code.entry(t.code.clone()).or_insert(t);
        }
        Self { by_code }
    }

    pub fn is_valid(&self, code: &str) -> bool {
        self.by_code.contains_key(&code.trim().to_uppercase())
    }

    /// The catalog's spelling of `code`, or `None` if the code is unknown.
    pub fn normalize(&self, code: &str) -> Option<String> {
        self.by_code
            .get(&code.trim().to_uppercase())
            .map(|t| t.code.clone())
    }

    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.by_code
            .get(&code.trim().to_uppercase())
            .map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Translation> {
        self.by_code.values()
    }
}

pub struct TranslationCatalog {
    table: RwLock<Arc<TranslationTable>>,
    default_code: String,
}

impl TranslationCatalog {
    pub fn new(table: TranslationTable, default_code: &str) -> Self {
        Self {
            table: RwLock::new(Arc::new(table)),
            default_code: default_code.trim().to_uppercase(),
        }
    }

    /// Current table. Cheap; callers keep it for the duration of one message.
    pub async fn snapshot(&self) -> Arc<TranslationTable> {
        self.table.read().await.clone()
    }

    /// Re-fetch the translation list and swap it in. On error the previous table stays.
    #[instrument(level = "info", skip_all)]
    pub async fn refresh(
        &self,
        source: &dyn TranslationSource,
    ) -> Result<Arc<TranslationTable>, SourceError> {
        let listing = source.list_translations().await?;
        let table = TranslationTable::new(listing);
        if table.is_empty() {
            return Err(SourceError::EmptyListing);
        }
        let table = Arc::new(table);
        *self.table.write().await = table.clone();
        info!(target = "catalog", translations = table.len(), "translation list refreshed");
        Ok(table)
    }

    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    /// The translation to use when a reference names none: the user's stored default, then
    /// the subreddit's, then the process-wide default. Stored codes the catalog no longer
    /// offers are skipped.
    pub async fn default_for<S>(&self, store: &S, user: &str, subreddit: Option<&str>) -> String
    where
        S: PreferenceStore + ?Sized,
    {
        let table = self.snapshot().await;
        match store.user_translation(user).await {
            Ok(Some(code)) if table.is_valid(&code) => return code.to_uppercase(),
            Ok(_) => {}
            Err(e) => warn!(target = "catalog", user, error = %e, "user default lookup failed"),
        }
        if let Some(sub) = subreddit {
            match store.subreddit_translation(sub).await {
                Ok(Some(code)) if table.is_valid(&code) => return code.to_uppercase(),
                Ok(_) => {}
                Err(e) => {
                    warn!(target = "catalog", subreddit = sub, error = %e, "subreddit default lookup failed")
                }
            }
        }
        self.default_code.clone()
    }
}
