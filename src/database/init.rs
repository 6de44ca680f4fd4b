//! Connection pool creation and schema bootstrap.

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tracing::info;

/// A type alias for the database connection pool (`Pool<Postgres>`).
pub type DbPool = Pool<Postgres>;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS user_translations (
        username TEXT PRIMARY KEY,
        translation TEXT NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS subreddit_translations (
        subreddit TEXT PRIMARY KEY,
        translation TEXT NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS translations (
        code TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        language TEXT,
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS processed_messages (
        fullname TEXT PRIMARY KEY,
        processed_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
];

pub async fn connect(database_url: &str) -> sqlx::Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await?;
    ensure_schema(&pool).await?;
    info!(target = "database", "connected and schema ready");
    Ok(pool)
}

pub async fn ensure_schema(pool: &DbPool) -> sqlx::Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}
