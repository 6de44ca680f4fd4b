//! Pulling comment and subreddit identifiers out of message bodies.

use regex::Regex;
use std::sync::LazyLock;

static COMMENT_PERMALINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)reddit\.com/r/\w+/comments/[a-z0-9]+/[^/\s)]*/(?P<id>[a-z0-9]+)")
        .expect("permalink pattern compiles")
});

static COMMENT_FULLNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bt1_(?P<id>[a-z0-9]+)\b").expect("fullname pattern compiles"));

static SUBREDDIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[\s(])/?r/(?P<name>[a-z0-9][a-z0-9_]{1,20})\b")
        .expect("subreddit pattern compiles")
});

/// The fullname (`t1_...`) of the first comment linked or named in `text`.
pub fn comment_fullname(text: &str) -> Option<String> {
    COMMENT_PERMALINK
        .captures(text)
        .or_else(|| COMMENT_FULLNAME.captures(text))
        .and_then(|c| c.name("id"))
        .map(|id| format!("t1_{}", id.as_str().to_lowercase()))
}

/// The first `r/name` or `/r/name` mentioned in `text`, without the prefix.
pub fn subreddit_name(text: &str) -> Option<String> {
    SUBREDDIT
        .captures(text)
        .and_then(|c| c.name("name"))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_from_permalink_or_fullname() {
        assert_eq!(
            comment_fullname("please fix https://www.reddit.com/r/Bible/comments/3abc12/some_title/cs9xyz0/ thanks"),
            Some("t1_cs9xyz0".to_string())
        );
        assert_eq!(comment_fullname("delete t1_cs9xyz0"), Some("t1_cs9xyz0".to_string()));
        assert_eq!(comment_fullname("no link here"), None);
    }

    #[test]
    fn subreddit_with_and_without_slash() {
        assert_eq!(subreddit_name("r/Christianity NIV"), Some("Christianity".to_string()));
        assert_eq!(subreddit_name("set /r/bible_study to ESV"), Some("bible_study".to_string()));
        assert_eq!(subreddit_name("ESV please"), None);
    }
}
