use std::sync::Arc;

use anyhow::{Context, ensure};
use tracing::info;
use tracing_subscriber::EnvFilter;

use versebot::bible::fetcher::RetryPolicy;
use versebot::bible::provider::BibleApiClient;
use versebot::config::Config;
use versebot::database::{PgStore, init};
use versebot::handler::{self, Schedule};
use versebot::model::{AppState, StateOptions};
use versebot::reddit::RedditClient;
use versebot::services::preferences::CachedStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    let pool = init::connect(&config.database_url)
        .await
        .context("failed to connect to the database")?;
    let store = Arc::new(CachedStore::new(PgStore::new(pool)));

    let reddit = RedditClient::new(config.reddit.clone()).context("failed to build reddit client")?;
    reddit.login().await.context("reddit login failed")?;
    info!(target = "startup", user = %config.reddit.username, "logged in to reddit");

    let source = Arc::new(
        BibleApiClient::new(&config.bible_api_base_url)
            .context("failed to build translation provider client")?,
    );

    let state = AppState::new(
        Arc::new(reddit),
        store,
        source,
        StateOptions {
            admin: config.admin.clone(),
            default_translation: config.default_translation.clone(),
            max_reply_length: config.max_reply_length,
            retry: RetryPolicy {
                max_retries: config.fetch_max_retries,
                ..RetryPolicy::default()
            },
        },
    );

    let table = state
        .refresh_catalog()
        .await
        .context("failed to load the translation list")?;
    ensure!(
        table.is_valid(state.catalog.default_code()),
        "default translation {} is not offered by the provider",
        state.catalog.default_code()
    );
    info!(target = "startup", translations = table.len(), "translation list loaded");

    handler::run(
        &state,
        Schedule {
            poll_interval: config.poll_interval,
            catalog_refresh: config.catalog_refresh,
        },
    )
    .await;
    Ok(())
}
