//! Default translation requests, per user and per subreddit.

use super::WorkflowError;
use crate::AppState;
use crate::bible::catalog::TranslationTable;
use crate::reddit::InboxMessage;
use crate::reddit::links::subreddit_name;
use tracing::{info, instrument};

/// First word of `text` that the catalog knows as a translation code, skipping `exclude`.
/// Hyphens stay inside words so codes such as `oeb-us` survive.
fn first_code(table: &TranslationTable, text: &str, exclude: &[&str]) -> Option<String> {
    text.split(|c: char| !c.is_ascii_alphanumeric() && c != '-')
        .map(|w| w.trim_matches('-'))
        .filter(|w| !w.is_empty())
        .filter(|w| !exclude.iter().any(|x| x.eq_ignore_ascii_case(w)))
        .find_map(|w| table.normalize(w))
}

fn supported_codes(table: &TranslationTable) -> String {
    let mut codes: Vec<&str> = table.iter().map(|t| t.code.as_str()).collect();
    codes.sort_unstable();
    codes.join(", ")
}

fn describe(table: &TranslationTable, code: &str) -> String {
    match table.display_name(code) {
        Some(name) => format!("{name} ({code})"),
        None => code.to_string(),
    }
}

#[instrument(level = "info", skip_all, fields(message = %message.name))]
pub async fn run_user(state: &AppState, message: &InboxMessage) -> Result<(), WorkflowError> {
    let table = state.catalog.snapshot().await;
    let user = message.author();
    let text = match first_code(&table, &message.body, &[]) {
        Some(code) => {
            state.store.set_user_translation(user, &code).await?;
            info!(target = "translation", user, code = %code, "user default updated");
            format!(
                "Your default translation is now {}. It applies whenever you don't name one.",
                describe(&table, &code)
            )
        }
        None => format!(
            "I couldn't find a supported translation code in your message. Supported codes: {}",
            supported_codes(&table)
        ),
    };
    state.platform.reply(message, &text).await?;
    Ok(())
}

#[instrument(level = "info", skip_all, fields(message = %message.name))]
pub async fn run_subreddit(state: &AppState, message: &InboxMessage) -> Result<(), WorkflowError> {
    let table = state.catalog.snapshot().await;
    let user = message.author();
    let text = match subreddit_name(&message.body) {
        None => "Please name the subreddit as r/name in your message.".to_string(),
        Some(subreddit) => match first_code(&table, &message.body, &["r", subreddit.as_str()]) {
            None => format!(
                "I couldn't find a supported translation code in your message. Supported codes: {}",
                supported_codes(&table)
            ),
            Some(code) => {
                if state.platform.is_moderator(&subreddit, user).await? {
                    state.store.set_subreddit_translation(&subreddit, &code).await?;
                    info!(target = "translation", subreddit = %subreddit, code = %code, "subreddit default updated");
                    format!(
                        "The default translation for r/{subreddit} is now {}.",
                        describe(&table, &code)
                    )
                } else {
                    info!(target = "translation", subreddit = %subreddit, user, "requester is not a moderator");
                    format!("Only moderators of r/{subreddit} can change its default translation.")
                }
            }
        },
    };
    state.platform.reply(message, &text).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bible::catalog::Translation;

    #[test]
    fn first_supported_code_wins() {
        let table = TranslationTable::new([
            Translation::new("KJV", "King James Version", None),
            Translation::new("WEB", "World English Bible", None),
        ]);
        assert_eq!(first_code(&table, "please use esv or web, then kjv", &[]), Some("WEB".to_string()));
        assert_eq!(first_code(&table, "r/web kjv", &["r", "web"]), Some("KJV".to_string()));
        assert_eq!(first_code(&table, "nothing useful", &[]), None);
        assert_eq!(supported_codes(&table), "KJV, WEB");
    }

    #[test]
    fn hyphenated_code_is_one_word() {
        let table = TranslationTable::new([
            Translation::new("KJV", "King James Version", None),
            Translation::new("oeb-us", "Open English Bible, US Edition", None),
        ]);
        assert_eq!(first_code(&table, "set mine to oeb-us please", &[]), Some("OEB-US".to_string()));
        assert_eq!(first_code(&table, "--oeb-us.", &[]), Some("OEB-US".to_string()));
        assert_eq!(first_code(&table, "oeb us", &[]), None);
    }
}
