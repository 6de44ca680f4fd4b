//! External translation provider: the translation listing and single-passage lookups.
//!
//! `BibleApiClient` speaks the bible-api.com JSON API. Anything else that can list
//! translations and render a passage can stand in through [`TranslationSource`].

use super::catalog::Translation;
use super::verse::VerseSpan;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BIBLE_API_BASE: &str = "https://bible-api.com";
const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to translation provider failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("translation provider answered {0}")]
    Status(StatusCode),
    #[error("translation provider returned an empty translation list")]
    EmptyListing,
}

/// A passage to look up, independent of who asked for it.
#[derive(Debug, Clone, Copy)]
pub struct Passage<'a> {
    pub book: &'a str,
    pub chapter: u32,
    pub verses: VerseSpan,
    pub translation: &'a str,
}

#[async_trait]
pub trait TranslationSource: Send + Sync {
    /// Every translation the provider can serve.
    async fn list_translations(&self) -> Result<Vec<Translation>, SourceError>;

    /// Rendered passage text, `Ok(None)` when the provider has no such passage in that
    /// translation. `Err` is reserved for transport and provider failures.
    async fn lookup(&self, passage: Passage<'_>) -> Result<Option<String>, SourceError>;
}

pub struct BibleApiClient {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct ListingBody {
    translations: Vec<ListingEntry>,
}

#[derive(Deserialize)]
struct ListingEntry {
    identifier: String,
    name: String,
    #[serde(default)]
    language: Option<String>,
}

#[derive(Deserialize)]
struct PassageBody {
    #[serde(default)]
    verses: Vec<PassageVerse>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct PassageVerse {
    verse: u32,
    text: String,
}

impl BibleApiClient {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(crate::constants::USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl TranslationSource for BibleApiClient {
    async fn list_translations(&self) -> Result<Vec<Translation>, SourceError> {
        let url = format!("{}/data", self.base_url);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status()));
        }
        let body: ListingBody = response.json().await?;
        debug!(target = "provider", count = body.translations.len(), "translation listing");
        Ok(body
            .translations
            .into_iter()
            .map(|t| Translation::new(&t.identifier, &t.name, t.language.as_deref()))
            .collect())
    }

    async fn lookup(&self, passage: Passage<'_>) -> Result<Option<String>, SourceError> {
        let url = format!(
            "{}/{}+{}:{}",
            self.base_url,
            passage.book.replace(' ', "+"),
            passage.chapter,
            passage.verses
        );
        let response = self
            .client
            .get(&url)
            .query(&[("translation", passage.translation.to_lowercase())])
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            s if !s.is_success() => return Err(SourceError::Status(s)),
            _ => {}
        }
        let body: PassageBody = response.json().await?;
        Ok(render_passage(&body))
    }
}

// Multi-verse passages get superscript verse numbers so readers can follow along.
fn render_passage(body: &PassageBody) -> Option<String> {
    let text = match body.verses.as_slice() {
        [] => body.text.as_deref().map(clean)?,
        [only] => clean(&only.text),
        many => many
            .iter()
            .map(|v| format!("^{} {}", v.verse, clean(&v.text)))
            .collect::<Vec<_>>()
            .join(" "),
    };
    (!text.is_empty()).then_some(text)
}

fn clean(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
