//! Everything the bot needs from reddit, behind the [`Platform`] trait.
//!
//! `client::RedditClient` is the real implementation. Workflows only ever talk to
//! `&dyn Platform`, which keeps them testable without network access.

pub mod client;
pub mod links;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub use client::{RedditClient, RedditCredentials};

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("reddit request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("reddit answered {0}")]
    Status(StatusCode),
    #[error("reddit authentication failed: {0}")]
    Auth(String),
    #[error("reddit rejected the request: {0}")]
    Api(String),
}

/// One inbox item: a username mention (comment) or a private message.
#[derive(Debug, Clone, Deserialize)]
pub struct InboxMessage {
    /// Fullname, e.g. `t1_abc123` for comments or `t4_abc123` for messages.
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub subreddit: Option<String>,
    /// Path of the comment in its thread; empty for private messages.
    #[serde(default)]
    pub context: String,
}

impl InboxMessage {
    pub fn author(&self) -> &str {
        self.author.as_deref().unwrap_or("[deleted]")
    }

    pub fn subreddit(&self) -> Option<&str> {
        self.subreddit.as_deref().filter(|s| !s.is_empty())
    }

    pub fn permalink(&self) -> String {
        if self.context.is_empty() {
            let id = self.name.split_once('_').map_or(self.name.as_str(), |(_, id)| id);
            format!("https://www.reddit.com/message/messages/{id}")
        } else {
            format!("https://www.reddit.com{}", self.context)
        }
    }
}

/// The parts of a comment the edit and delete workflows look at.
#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub subreddit: String,
    #[serde(default)]
    pub body: String,
}

#[async_trait]
pub trait Platform: Send + Sync {
    /// The account the bot is logged in as.
    fn username(&self) -> &str;

    /// Unread inbox items, oldest first.
    async fn unread(&self) -> Result<Vec<InboxMessage>, PlatformError>;

    async fn mark_read(&self, message: &InboxMessage) -> Result<(), PlatformError>;

    /// Reply in place: a comment reply for mentions, a message reply for PMs.
    async fn reply(&self, message: &InboxMessage, body: &str) -> Result<(), PlatformError>;

    async fn send_message(&self, to: &str, subject: &str, body: &str) -> Result<(), PlatformError>;

    /// Look up a comment by fullname; `None` if reddit does not know it.
    async fn comment(&self, fullname: &str) -> Result<Option<Comment>, PlatformError>;

    async fn edit_comment(&self, fullname: &str, body: &str) -> Result<(), PlatformError>;

    async fn delete_comment(&self, fullname: &str) -> Result<(), PlatformError>;

    async fn is_moderator(&self, subreddit: &str, user: &str) -> Result<bool, PlatformError>;
}
