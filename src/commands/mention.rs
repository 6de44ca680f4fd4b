use super::{Quotation, WorkflowError, quote_verses};
use crate::AppState;
use crate::constants::FORWARD_SUBJECT;
use crate::reddit::InboxMessage;
use tracing::{info, instrument};

/// Quote every verse a mention asks for. A mention with no recognizable reference at all
/// goes to the admin instead.
#[instrument(level = "info", skip_all, fields(message = %message.name))]
pub async fn run(state: &AppState, message: &InboxMessage) -> Result<(), WorkflowError> {
    match quote_verses(state, message, &message.body, message.subreddit()).await {
        Quotation::Reply(body) => {
            info!(target = "mention", author = message.author(), "replying with verse quotations");
            state.platform.reply(message, &body).await?;
        }
        Quotation::Nothing => {
            info!(target = "mention", author = message.author(), "no quotable verses, staying silent");
        }
        Quotation::NoReferences => {
            info!(target = "mention", admin = %state.admin, "no verses found, forwarding to admin");
            state
                .platform
                .send_message(&state.admin, FORWARD_SUBJECT, &forward_body(message))
                .await?;
        }
    }
    Ok(())
}

pub fn forward_body(message: &InboxMessage) -> String {
    format!(
        "{}\n\n[[Link to Original Message]({})]",
        message.body,
        message.permalink()
    )
}
