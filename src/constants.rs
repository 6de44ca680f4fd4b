// Central constants for polling, reply limits and message texts.
pub const USER_AGENT: &str = concat!(
    "linux:versebot:v",
    env!("CARGO_PKG_VERSION"),
    " (quotes Bible verses on request)"
);
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
pub const DEFAULT_MAX_REPLY_LENGTH: usize = 10_000; // reddit's comment limit
pub const DEFAULT_TRANSLATION: &str = "KJV";
pub const DEFAULT_CATALOG_REFRESH_SECS: u64 = 86_400;
pub const DEFAULT_FETCH_MAX_RETRIES: u32 = 3;
// reddit stops listing items as unread long before this; the ledger only needs to outlive that.
pub const PROCESSED_RETENTION_DAYS: i64 = 30;

pub const FORWARD_SUBJECT: &str = "Forwarded VerseBot Message";
pub const EDIT_CONFIRM_SUBJECT: &str = "VerseBot edit request";
pub const DELETE_CONFIRM_SUBJECT: &str = "VerseBot delete request";

/// Footer appended to every verse reply.
pub fn reply_footer(bot: &str, admin: &str) -> String {
    let compose = format!("https://www.reddit.com/message/compose/?to={bot}");
    format!(
        "\n\n***\n^[[Edit]({compose}&subject=edit%20request&message=Link%20to%20the%20VerseBot%20comment,%20then%20the%20new%20verses)] \
         ^[[Delete]({compose}&subject=delete%20request&message=Link%20to%20the%20VerseBot%20comment)] \
         ^[[Default&#32;translation]({compose}&subject=user%20translation%20default%20request&message=Translation%20code,%20e.g.%20ESV)] \
         ^[[Contact&#32;admin](https://www.reddit.com/message/compose/?to={admin})]"
    )
}
