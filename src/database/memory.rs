//! In-process store with the same semantics as the PostgreSQL one. Keys are
//! case-insensitive, matching the `lower(...)` columns on the database side.

use super::{PreferenceStore, ProcessedLog, StoreResult, TranslationArchive};
use crate::bible::catalog::Translation;
use async_trait::async_trait;
use sqlx::types::chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, String>>,
    subreddits: RwLock<HashMap<String, String>>,
    processed: RwLock<HashMap<String, DateTime<Utc>>>,
    translations: RwLock<Vec<Translation>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn archived_translations(&self) -> Vec<Translation> {
        self.translations.read().await.clone()
    }
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn user_translation(&self, user: &str) -> StoreResult<Option<String>> {
        Ok(self.users.read().await.get(&user.to_lowercase()).cloned())
    }

    async fn set_user_translation(&self, user: &str, code: &str) -> StoreResult<()> {
        self.users
            .write()
            .await
            .insert(user.to_lowercase(), code.to_string());
        Ok(())
    }

    async fn subreddit_translation(&self, subreddit: &str) -> StoreResult<Option<String>> {
        Ok(self
            .subreddits
            .read()
            .await
            .get(&subreddit.to_lowercase())
            .cloned())
    }

    async fn set_subreddit_translation(&self, subreddit: &str, code: &str) -> StoreResult<()> {
        self.subreddits
            .write()
            .await
            .insert(subreddit.to_lowercase(), code.to_string());
        Ok(())
    }
}

#[async_trait]
impl ProcessedLog for MemoryStore {
    async fn claim(&self, fullname: &str) -> StoreResult<bool> {
        let mut processed = self.processed.write().await;
        if processed.contains_key(fullname) {
            return Ok(false);
        }
        processed.insert(fullname.to_string(), Utc::now());
        Ok(true)
    }

    async fn prune(&self, before: DateTime<Utc>) -> StoreResult<u64> {
        let mut processed = self.processed.write().await;
        let len = processed.len();
        processed.retain(|_, at| *at >= before);
        Ok((len - processed.len()) as u64)
    }
}

#[async_trait]
impl TranslationArchive for MemoryStore {
    async fn save_translations(&self, list: &[Translation]) -> StoreResult<()> {
        *self.translations.write().await = list.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn claims_are_exclusive_until_pruned() {
        let store = MemoryStore::new();
        assert!(store.claim("t1_a").await.unwrap());
        assert!(!store.claim("t1_a").await.unwrap());
        assert!(store.claim("t4_b").await.unwrap());

        assert_eq!(store.prune(Utc::now() - Duration::days(1)).await.unwrap(), 0);
        assert_eq!(store.prune(Utc::now() + Duration::seconds(1)).await.unwrap(), 2);
        assert!(store.claim("t1_a").await.unwrap());
    }

    #[tokio::test]
    async fn translation_archive_replaces_previous_list() {
        let store = MemoryStore::new();
        store
            .save_translations(&[Translation::new("kjv", "King James Version", None)])
            .await
            .unwrap();
        store
            .save_translations(&[Translation::new("web", "World English Bible", None)])
            .await
            .unwrap();
        let codes: Vec<_> = store.archived_translations().await.into_iter().map(|t| t.code).collect();
        assert_eq!(codes, ["WEB"]);
    }
}
