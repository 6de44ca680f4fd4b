//! Runtime configuration, read from the environment (and `.env` when present).

use crate::bible::provider::DEFAULT_BIBLE_API_BASE;
use crate::constants::{
    DEFAULT_CATALOG_REFRESH_SECS, DEFAULT_FETCH_MAX_RETRIES, DEFAULT_MAX_REPLY_LENGTH,
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TRANSLATION,
};
use crate::reddit::RedditCredentials;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("environment variable {name} has invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub reddit: RedditCredentials,
    pub database_url: String,
    pub admin: String,
    pub default_translation: String,
    pub poll_interval: Duration,
    pub max_reply_length: usize,
    pub bible_api_base_url: String,
    /// `None` disables the periodic re-fetch; the startup refresh always happens.
    pub catalog_refresh: Option<Duration>,
    pub fetch_max_retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let refresh_secs: u64 = parsed(&lookup, "CATALOG_REFRESH_SECS", DEFAULT_CATALOG_REFRESH_SECS)?;
        let max_reply_length = parsed(&lookup, "MAX_REPLY_LENGTH", DEFAULT_MAX_REPLY_LENGTH)?;
        if max_reply_length == 0 {
            return Err(ConfigError::Invalid {
                name: "MAX_REPLY_LENGTH",
                value: "0".into(),
            });
        }
        Ok(Self {
            reddit: RedditCredentials {
                username: required("REDDIT_USERNAME")?,
                password: required("REDDIT_PASSWORD")?,
                client_id: required("REDDIT_CLIENT_ID")?,
                client_secret: required("REDDIT_CLIENT_SECRET")?,
            },
            database_url: required("DATABASE_URL")?,
            admin: required("VERSEBOT_ADMIN")?,
            default_translation: lookup("DEFAULT_TRANSLATION")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TRANSLATION.to_string())
                .trim()
                .to_uppercase(),
            poll_interval: Duration::from_secs(parsed(
                &lookup,
                "POLL_INTERVAL_SECS",
                DEFAULT_POLL_INTERVAL_SECS,
            )?),
            max_reply_length,
            bible_api_base_url: lookup("BIBLE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BIBLE_API_BASE.to_string()),
            catalog_refresh: (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs)),
            fetch_max_retries: parsed(&lookup, "FETCH_MAX_RETRIES", DEFAULT_FETCH_MAX_RETRIES)?,
        })
    }
}

fn parsed<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}
