//! The verse pipeline: extraction, book and translation resolution, fetching, and reply
//! composition.

pub mod books;
pub mod catalog;
pub mod extract;
pub mod fetcher;
pub mod provider;
pub mod response;
pub mod verse;

use catalog::TranslationTable;
use verse::{RawReference, ResolvedVerse, TranslationToken};

/// Who asked for a verse and where.
#[derive(Debug, Clone, Copy)]
pub struct Requester<'a> {
    pub user: &'a str,
    pub subreddit: Option<&'a str>,
    pub permalink: &'a str,
}

/// Resolve a raw reference's book and translation.
///
/// Returns `None` when the book is unknown or when a delimited translation (`(XYZ)`) is not
/// in the catalog. A bare trailing word that is not a translation code is treated as
/// ordinary prose and the requester's default applies.
pub fn resolve(
    raw: &RawReference,
    table: &TranslationTable,
    default_code: &str,
    requester: Requester<'_>,
) -> Option<ResolvedVerse> {
    let book = books::get_book(&raw.book)?;
    let translation = match &raw.translation {
        Some(TranslationToken::Delimited(code)) => table.normalize(code)?,
        Some(TranslationToken::Bare(word)) => table
            .normalize(word)
            .unwrap_or_else(|| default_code.to_string()),
        None => default_code.to_string(),
    };
    Some(ResolvedVerse {
        book,
        chapter: raw.chapter,
        verses: raw.verses,
        translation,
        user: requester.user.to_string(),
        subreddit: requester.subreddit.map(str::to_string),
        permalink: requester.permalink.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::catalog::Translation;
    use super::*;

    fn table() -> TranslationTable {
        TranslationTable::new([
            Translation::new("KJV", "King James Version", None),
            Translation::new("NIV", "New International Version", None),
        ])
    }

    fn requester() -> Requester<'static> {
        Requester {
            user: "someone",
            subreddit: Some("Bible"),
            permalink: "https://www.reddit.com/r/Bible/comments/x/y/z",
        }
    }

    #[test]
    fn bare_prose_word_falls_back_to_default() {
        let raw = extract::extract("Gen 1:1-2 and more").next().expect("reference");
        let v = resolve(&raw, &table(), "KJV", requester()).expect("resolved");
        assert_eq!(v.book, "Genesis");
        assert_eq!(v.translation, "KJV");
    }

    #[test]
    fn unknown_delimited_translation_drops_reference() {
        let raw = extract::extract("John 3:16 (XYZ)").next().expect("reference");
        assert!(resolve(&raw, &table(), "KJV", requester()).is_none());
    }

    #[test]
    fn known_bare_translation_is_normalized() {
        let raw = extract::extract("john 3:16 niv").next().expect("reference");
        let v = resolve(&raw, &table(), "KJV", requester()).expect("resolved");
        assert_eq!(v.translation, "NIV");
        assert_eq!(v.reference(), "John 3:16");
    }

    #[test]
    fn hyphenated_translation_resolves() {
        let table = TranslationTable::new([
            Translation::new("KJV", "King James Version", None),
            Translation::new("oeb-us", "Open English Bible, US Edition", None),
        ]);
        for text in ["John 3:16 (OEB-US)", "John 3:16 oeb-us"] {
            let raw = extract::extract(text).next().expect("reference");
            let v = resolve(&raw, &table, "KJV", requester()).expect("resolved");
            assert_eq!(v.translation, "OEB-US", "{text}");
        }
    }
}
