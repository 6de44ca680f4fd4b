//! Default-translation preferences for users and subreddits.

use sqlx::PgPool;
use tracing::instrument;

#[instrument(level = "debug", skip(pool))]
pub async fn get_user_translation(pool: &PgPool, username: &str) -> sqlx::Result<Option<String>> {
    sqlx::query_scalar("SELECT translation FROM user_translations WHERE username = lower($1)")
        .bind(username)
        .fetch_optional(pool)
        .await
}

#[instrument(level = "debug", skip(pool))]
pub async fn set_user_translation(pool: &PgPool, username: &str, code: &str) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO user_translations (username, translation) VALUES (lower($1), $2) ON CONFLICT (username) DO UPDATE SET translation = EXCLUDED.translation, updated_at = now()")
        .bind(username)
        .bind(code)
        .execute(pool)
        .await?;
    Ok(())
}

#[instrument(level = "debug", skip(pool))]
pub async fn get_subreddit_translation(
    pool: &PgPool,
    subreddit: &str,
) -> sqlx::Result<Option<String>> {
    sqlx::query_scalar("SELECT translation FROM subreddit_translations WHERE subreddit = lower($1)")
        .bind(subreddit)
        .fetch_optional(pool)
        .await
}

#[instrument(level = "debug", skip(pool))]
pub async fn set_subreddit_translation(
    pool: &PgPool,
    subreddit: &str,
    code: &str,
) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO subreddit_translations (subreddit, translation) VALUES (lower($1), $2) ON CONFLICT (subreddit) DO UPDATE SET translation = EXCLUDED.translation, updated_at = now()")
        .bind(subreddit)
        .bind(code)
        .execute(pool)
        .await?;
    Ok(())
}
