use super::{Quotation, WorkflowError, owned_bot_comment, quote_verses};
use crate::AppState;
use crate::constants::EDIT_CONFIRM_SUBJECT;
use crate::reddit::InboxMessage;
use tracing::{info, instrument};

/// Replace the quotations in one of the bot's comments with the verses named in the
/// request.
#[instrument(level = "info", skip_all, fields(message = %message.name))]
pub async fn run(state: &AppState, message: &InboxMessage) -> Result<(), WorkflowError> {
    let comment = match owned_bot_comment(state, message).await {
        Ok(comment) => comment,
        Err(WorkflowError::Denied(reason)) => {
            info!(target = "edit", author = message.author(), %reason, "edit refused");
            return notify(state, message, &reason.to_string()).await;
        }
        Err(e) => return Err(e),
    };

    let subreddit = Some(comment.subreddit.as_str()).filter(|s| !s.is_empty());
    match quote_verses(state, message, &message.body, subreddit).await {
        Quotation::Reply(body) => {
            state.platform.edit_comment(&comment.name, &body).await?;
            info!(target = "edit", comment = %comment.name, "comment updated");
            notify(state, message, "Your VerseBot comment has been updated with the new verses.").await
        }
        Quotation::NoReferences | Quotation::Nothing => {
            notify(
                state,
                message,
                "None of the verses in your message could be quoted, so the comment was left unchanged.",
            )
            .await
        }
    }
}

async fn notify(state: &AppState, message: &InboxMessage, text: &str) -> Result<(), WorkflowError> {
    state
        .platform
        .send_message(message.author(), EDIT_CONFIRM_SUBJECT, text)
        .await?;
    Ok(())
}
