//! Ledger of inbox items the bot has already acted on.

use sqlx::PgPool;
use sqlx::types::chrono::{DateTime, Utc};
use tracing::instrument;

/// Record `fullname` as processed. Returns `false` if it was already recorded, in which case
/// the caller must not act on the message again.
#[instrument(level = "debug", skip(pool))]
pub async fn claim_message(pool: &PgPool, fullname: &str) -> sqlx::Result<bool> {
    let res = sqlx::query(
        "INSERT INTO processed_messages (fullname) VALUES ($1) ON CONFLICT (fullname) DO NOTHING",
    )
    .bind(fullname)
    .execute(pool)
    .await?;
    Ok(res.rows_affected() == 1)
}

/// Drop ledger rows older than `before`. reddit never re-delivers items that old as unread.
pub async fn prune_processed(pool: &PgPool, before: DateTime<Utc>) -> sqlx::Result<u64> {
    let res = sqlx::query("DELETE FROM processed_messages WHERE processed_at < $1")
        .bind(before)
        .execute(pool)
        .await?;
    Ok(res.rows_affected())
}
