//! This module acts as a central hub for all database-related logic.
//!
//! Workflows see storage only through the traits below. `PgStore` is the production
//! implementation over PostgreSQL; `memory::MemoryStore` keeps everything in-process.

pub mod init;
pub mod memory;
pub mod preferences;
pub mod processed;
pub mod translations;

use crate::bible::catalog::Translation;
use async_trait::async_trait;
use init::DbPool;
use sqlx::types::chrono::{DateTime, Utc};

pub type StoreResult<T> = Result<T, sqlx::Error>;

/// Default-translation preferences. Every read and write touches a single key.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn user_translation(&self, user: &str) -> StoreResult<Option<String>>;
    async fn set_user_translation(&self, user: &str, code: &str) -> StoreResult<()>;
    async fn subreddit_translation(&self, subreddit: &str) -> StoreResult<Option<String>>;
    async fn set_subreddit_translation(&self, subreddit: &str, code: &str) -> StoreResult<()>;
}

/// Guards against acting twice on the same inbox item.
#[async_trait]
pub trait ProcessedLog: Send + Sync {
    /// `true` if this call recorded the item, `false` if it was already there.
    async fn claim(&self, fullname: &str) -> StoreResult<bool>;
    async fn prune(&self, before: DateTime<Utc>) -> StoreResult<u64>;
}

#[async_trait]
pub trait TranslationArchive: Send + Sync {
    async fn save_translations(&self, translations: &[Translation]) -> StoreResult<()>;
}

/// Everything the bot persists.
pub trait BotStore: PreferenceStore + ProcessedLog + TranslationArchive {}

impl<T: PreferenceStore + ProcessedLog + TranslationArchive> BotStore for T {}

#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceStore for PgStore {
    async fn user_translation(&self, user: &str) -> StoreResult<Option<String>> {
        preferences::get_user_translation(&self.pool, user).await
    }

    async fn set_user_translation(&self, user: &str, code: &str) -> StoreResult<()> {
        preferences::set_user_translation(&self.pool, user, code).await
    }

    async fn subreddit_translation(&self, subreddit: &str) -> StoreResult<Option<String>> {
        preferences::get_subreddit_translation(&self.pool, subreddit).await
    }

    async fn set_subreddit_translation(&self, subreddit: &str, code: &str) -> StoreResult<()> {
        preferences::set_subreddit_translation(&self.pool, subreddit, code).await
    }
}

#[async_trait]
impl ProcessedLog for PgStore {
    async fn claim(&self, fullname: &str) -> StoreResult<bool> {
        processed::claim_message(&self.pool, fullname).await
    }

    async fn prune(&self, before: DateTime<Utc>) -> StoreResult<u64> {
        processed::prune_processed(&self.pool, before).await
    }
}

#[async_trait]
impl TranslationArchive for PgStore {
    async fn save_translations(&self, list: &[Translation]) -> StoreResult<()> {
        translations::save_translations(&self.pool, list).await
    }
}
