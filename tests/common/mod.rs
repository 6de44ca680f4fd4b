// In-memory stand-ins for reddit and the translation provider, shared by the integration
// tests. Each test binary uses a different subset.
#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;
use versebot::bible::catalog::Translation;
use versebot::bible::fetcher::RetryPolicy;
use versebot::bible::provider::{Passage, SourceError, TranslationSource};
use versebot::database::memory::MemoryStore;
use versebot::model::{AppState, StateOptions};
use versebot::reddit::{Comment, InboxMessage, Platform, PlatformError};

pub const BOT: &str = "VerseBot";
pub const ADMIN: &str = "verse_admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct FakePlatform {
    pub inbox: Mutex<Vec<InboxMessage>>,
    pub read: Mutex<Vec<String>>,
    pub replies: Mutex<Vec<(String, String)>>,
    pub sent: Mutex<Vec<Sent>>,
    pub comments: Mutex<HashMap<String, Comment>>,
    pub edits: Mutex<Vec<(String, String)>>,
    pub deleted: Mutex<Vec<String>>,
    /// (subreddit, user) pairs, lower-cased.
    pub moderators: Mutex<Vec<(String, String)>>,
}

impl FakePlatform {
    pub fn with_inbox(messages: Vec<InboxMessage>) -> Self {
        let platform = Self::default();
        *platform.inbox.lock().unwrap() = messages;
        platform
    }

    pub fn add_comment(&self, name: &str, author: &str, parent_id: &str, subreddit: &str) {
        self.comments.lock().unwrap().insert(
            name.to_string(),
            Comment {
                name: name.to_string(),
                author: author.to_string(),
                parent_id: parent_id.to_string(),
                subreddit: subreddit.to_string(),
                body: String::new(),
            },
        );
    }

    pub fn add_moderator(&self, subreddit: &str, user: &str) {
        self.moderators
            .lock()
            .unwrap()
            .push((subreddit.to_lowercase(), user.to_lowercase()));
    }

    pub fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn read(&self) -> Vec<String> {
        self.read.lock().unwrap().clone()
    }
}

#[async_trait]
impl Platform for FakePlatform {
    fn username(&self) -> &str {
        BOT
    }

    async fn unread(&self) -> Result<Vec<InboxMessage>, PlatformError> {
        let read = self.read.lock().unwrap().clone();
        Ok(self
            .inbox
            .lock()
            .unwrap()
            .iter()
            .filter(|m| !read.contains(&m.name))
            .cloned()
            .collect())
    }

    async fn mark_read(&self, message: &InboxMessage) -> Result<(), PlatformError> {
        self.read.lock().unwrap().push(message.name.clone());
        Ok(())
    }

    async fn reply(&self, message: &InboxMessage, body: &str) -> Result<(), PlatformError> {
        self.replies
            .lock()
            .unwrap()
            .push((message.name.clone(), body.to_string()));
        Ok(())
    }

    async fn send_message(&self, to: &str, subject: &str, body: &str) -> Result<(), PlatformError> {
        self.sent.lock().unwrap().push(Sent {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }

    async fn comment(&self, fullname: &str) -> Result<Option<Comment>, PlatformError> {
        Ok(self.comments.lock().unwrap().get(fullname).cloned())
    }

    async fn edit_comment(&self, fullname: &str, body: &str) -> Result<(), PlatformError> {
        self.edits
            .lock()
            .unwrap()
            .push((fullname.to_string(), body.to_string()));
        Ok(())
    }

    async fn delete_comment(&self, fullname: &str) -> Result<(), PlatformError> {
        self.deleted.lock().unwrap().push(fullname.to_string());
        Ok(())
    }

    async fn is_moderator(&self, subreddit: &str, user: &str) -> Result<bool, PlatformError> {
        let key = (subreddit.to_lowercase(), user.to_lowercase());
        Ok(self.moderators.lock().unwrap().contains(&key))
    }
}

/// Serves a fixed translation list and passage table. `failures` transport errors are
/// returned before any lookup succeeds.
pub struct FakeSource {
    translations: Vec<Translation>,
    passages: HashMap<String, String>,
    failures: AtomicU32,
    lookups: AtomicU32,
    listing_down: AtomicBool,
    listing_empty: AtomicBool,
}

impl FakeSource {
    pub fn new() -> Self {
        let passages = [
            ("John 3:16|NIV", "For God so loved the world that he gave his one and only Son."),
            ("John 3:16|KJV", "For God so loved the world, that he gave his only begotten Son."),
            ("Genesis 1:1-2|KJV", "^1 In the beginning God created the heaven and the earth. ^2 And the earth was without form, and void."),
            ("Exodus 20:1|KJV", "And God spake all these words, saying,"),
            ("Psalms 23:1|ESV", "The LORD is my shepherd; I shall not want."),
        ];
        Self {
            translations: vec![
                Translation::new("KJV", "King James Version", Some("English")),
                Translation::new("NIV", "New International Version", Some("English")),
                Translation::new("ESV", "English Standard Version", Some("English")),
                Translation::new("WEB", "World English Bible", Some("English")),
            ],
            passages: passages
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            failures: AtomicU32::new(0),
            lookups: AtomicU32::new(0),
            listing_down: AtomicBool::new(false),
            listing_empty: AtomicBool::new(false),
        }
    }

    pub fn failing(self, failures: u32) -> Self {
        self.failures.store(failures, Ordering::SeqCst);
        self
    }

    pub fn with_passage(mut self, key: &str, text: &str) -> Self {
        self.passages.insert(key.to_string(), text.to_string());
        self
    }

    pub fn lookups(&self) -> u32 {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Later listings fail with a 503.
    pub fn take_listing_down(&self) {
        self.listing_down.store(true, Ordering::SeqCst);
    }

    /// Later listings succeed but are empty.
    pub fn empty_listing(&self) {
        self.listing_empty.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl TranslationSource for FakeSource {
    async fn list_translations(&self) -> Result<Vec<Translation>, SourceError> {
        if self.listing_down.load(Ordering::SeqCst) {
            return Err(SourceError::Status(StatusCode::SERVICE_UNAVAILABLE));
        }
        if self.listing_empty.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }
        Ok(self.translations.clone())
    }

    async fn lookup(&self, passage: Passage<'_>) -> Result<Option<String>, SourceError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(SourceError::Status(StatusCode::BAD_GATEWAY));
        }
        let key = format!(
            "{} {}:{}|{}",
            passage.book, passage.chapter, passage.verses, passage.translation
        );
        Ok(self.passages.get(&key).cloned())
    }
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_retries: 2,
        initial_interval: Duration::from_millis(1),
        max_interval: Duration::from_millis(5),
        multiplier: 2.0,
        attempt_timeout: Duration::from_secs(1),
    }
}

pub struct Harness {
    pub platform: Arc<FakePlatform>,
    pub source: Arc<FakeSource>,
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

pub async fn harness_with(platform: FakePlatform, source: FakeSource, max_reply_length: usize) -> Harness {
    let platform = Arc::new(platform);
    let source = Arc::new(source);
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(
        platform.clone(),
        store.clone(),
        source.clone(),
        StateOptions {
            admin: ADMIN.to_string(),
            default_translation: "KJV".to_string(),
            max_reply_length,
            retry: fast_retry(),
        },
    );
    state.refresh_catalog().await.expect("catalog loads");
    Harness {
        platform,
        source,
        store,
        state,
    }
}

pub async fn harness(platform: FakePlatform) -> Harness {
    harness_with(platform, FakeSource::new(), 10_000).await
}

pub fn mention(name: &str, author: &str, body: &str) -> InboxMessage {
    InboxMessage {
        name: name.to_string(),
        author: Some(author.to_string()),
        subject: "username mention".to_string(),
        body: body.to_string(),
        subreddit: Some("Bible".to_string()),
        context: format!("/r/Bible/comments/abc123/title/{}/?context=3", &name[3..]),
    }
}

pub fn private_message(name: &str, author: &str, subject: &str, body: &str) -> InboxMessage {
    InboxMessage {
        name: name.to_string(),
        author: Some(author.to_string()),
        subject: subject.to_string(),
        body: body.to_string(),
        subreddit: None,
        context: String::new(),
    }
}
