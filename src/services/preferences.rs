//! Preference service layer: short-lived caching in front of the store.
//!
//! Mentions from the same user tend to arrive in bursts, so lookups are cached for a few
//! minutes. Writes go through this layer and drop the cached entry.
use super::cache::{self, TtlMap};
use crate::bible::catalog::Translation;
use crate::database::{PreferenceStore, ProcessedLog, StoreResult, TranslationArchive};
use async_trait::async_trait;
use sqlx::types::chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

pub const PREFERENCE_CACHE_TTL_SECS: u64 = 300;

pub struct CachedStore<S> {
    inner: S,
    ttl: Duration,
    users: TtlMap<String, Option<String>>,
    subreddits: TtlMap<String, Option<String>>,
}

impl<S> CachedStore<S> {
    pub fn new(inner: S) -> Self {
        Self::with_ttl(inner, Duration::from_secs(PREFERENCE_CACHE_TTL_SECS))
    }

    pub fn with_ttl(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            users: RwLock::new(HashMap::new()),
            subreddits: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl<S: PreferenceStore> PreferenceStore for CachedStore<S> {
    async fn user_translation(&self, user: &str) -> StoreResult<Option<String>> {
        let key = user.to_lowercase();
        if let Some(code) = cache::get_with_ttl(&self.users, &key, self.ttl).await {
            debug!(target = "cache.preferences", hit = true, kind = "user");
            return Ok(code);
        }
        let code = self.inner.user_translation(user).await?;
        cache::insert(&self.users, key, code.clone()).await;
        Ok(code)
    }

    async fn set_user_translation(&self, user: &str, code: &str) -> StoreResult<()> {
        self.inner.set_user_translation(user, code).await?;
        cache::invalidate(&self.users, &user.to_lowercase()).await;
        Ok(())
    }

    async fn subreddit_translation(&self, subreddit: &str) -> StoreResult<Option<String>> {
        let key = subreddit.to_lowercase();
        if let Some(code) = cache::get_with_ttl(&self.subreddits, &key, self.ttl).await {
            debug!(target = "cache.preferences", hit = true, kind = "subreddit");
            return Ok(code);
        }
        let code = self.inner.subreddit_translation(subreddit).await?;
        cache::insert(&self.subreddits, key, code.clone()).await;
        Ok(code)
    }

    async fn set_subreddit_translation(&self, subreddit: &str, code: &str) -> StoreResult<()> {
        self.inner.set_subreddit_translation(subreddit, code).await?;
        cache::invalidate(&self.subreddits, &subreddit.to_lowercase()).await;
        Ok(())
    }
}

#[async_trait]
impl<S: ProcessedLog> ProcessedLog for CachedStore<S> {
    async fn claim(&self, fullname: &str) -> StoreResult<bool> {
        self.inner.claim(fullname).await
    }

    async fn prune(&self, before: DateTime<Utc>) -> StoreResult<u64> {
        self.inner.prune(before).await
    }
}

#[async_trait]
impl<S: TranslationArchive> TranslationArchive for CachedStore<S> {
    async fn save_translations(&self, list: &[Translation]) -> StoreResult<()> {
        self.inner.save_translations(list).await
    }
}
