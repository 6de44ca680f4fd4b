// src/commands/mod.rs
// One module per inbox workflow, plus the pieces they share.

pub mod delete;
pub mod edit;
pub mod mention;
pub mod translation;

use crate::AppState;
use crate::bible::extract::extract;
use crate::bible::response::Response;
use crate::bible::{Requester, resolve};
use crate::reddit::{Comment, InboxMessage, PlatformError};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error("preference store failed: {0}")]
    Store(#[from] sqlx::Error),
    #[error(transparent)]
    Denied(#[from] Denied),
}

/// Why an edit or delete request was refused. The text is sent back to the requester.
#[derive(Debug, Error)]
pub enum Denied {
    #[error("I couldn't find a link to a VerseBot comment in your message.")]
    NoLink,
    #[error("That comment no longer exists.")]
    Missing,
    #[error("That comment was not written by VerseBot.")]
    NotBotComment,
    #[error("Only the person who summoned VerseBot can change that comment.")]
    NotRequester,
}

/// Outcome of running the verse pipeline over a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quotation {
    /// Nothing in the text looked like a reference.
    NoReferences,
    /// References were found, but none resolved or none could be fetched.
    Nothing,
    Reply(String),
}

/// Extract, resolve, deduplicate and compose. `subreddit` is the context used for the
/// default translation, which for edits is the bot comment's subreddit rather than the
/// message's.
pub async fn quote_verses(
    state: &AppState,
    message: &InboxMessage,
    text: &str,
    subreddit: Option<&str>,
) -> Quotation {
    let mut references = extract(text).peekable();
    if references.peek().is_none() {
        return Quotation::NoReferences;
    }

    let table = state.catalog.snapshot().await;
    let default_code = state
        .catalog
        .default_for(state.store.as_ref(), message.author(), subreddit)
        .await;
    let permalink = message.permalink();
    let requester = Requester {
        user: message.author(),
        subreddit,
        permalink: &permalink,
    };

    let mut response = Response::new(message, &state.fetcher, table.clone(), &state.layout);
    for raw in references {
        match resolve(&raw, &table, &default_code, requester) {
            Some(verse) => {
                response.add_verse(verse);
            }
            None => debug!(target = "pipeline", book = %raw.book, "reference did not resolve"),
        }
    }
    if response.is_empty() {
        return Quotation::Nothing;
    }
    match response.construct_message().await {
        Some(reply) => Quotation::Reply(reply),
        None => Quotation::Nothing,
    }
}

/// The bot comment linked in `message`, provided the requester summoned it.
pub async fn owned_bot_comment(
    state: &AppState,
    message: &InboxMessage,
) -> Result<Comment, WorkflowError> {
    let fullname = crate::reddit::links::comment_fullname(&message.body).ok_or(Denied::NoLink)?;
    let comment = state
        .platform
        .comment(&fullname)
        .await?
        .ok_or(Denied::Missing)?;
    if !comment.author.eq_ignore_ascii_case(state.platform.username()) {
        return Err(Denied::NotBotComment.into());
    }
    let parent = state
        .platform
        .comment(&comment.parent_id)
        .await?
        .ok_or(Denied::Missing)?;
    if !parent.author.eq_ignore_ascii_case(message.author()) {
        return Err(Denied::NotRequester.into());
    }
    Ok(comment)
}
