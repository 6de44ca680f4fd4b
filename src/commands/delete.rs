use super::{WorkflowError, owned_bot_comment};
use crate::AppState;
use crate::constants::DELETE_CONFIRM_SUBJECT;
use crate::reddit::InboxMessage;
use tracing::{info, instrument};

#[instrument(level = "info", skip_all, fields(message = %message.name))]
pub async fn run(state: &AppState, message: &InboxMessage) -> Result<(), WorkflowError> {
    let text = match owned_bot_comment(state, message).await {
        Ok(comment) => {
            state.platform.delete_comment(&comment.name).await?;
            info!(target = "delete", comment = %comment.name, "comment deleted");
            "Your VerseBot comment has been removed.".to_string()
        }
        Err(WorkflowError::Denied(reason)) => {
            info!(target = "delete", author = message.author(), %reason, "delete refused");
            reason.to_string()
        }
        Err(e) => return Err(e),
    };
    state
        .platform
        .send_message(message.author(), DELETE_CONFIRM_SUBJECT, &text)
        .await?;
    Ok(())
}
