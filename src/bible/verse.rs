//! Shared value types for the verse pipeline.

use std::fmt;

/// A single verse or an inclusive verse range within one chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerseSpan {
    Single(u32),
    Range(u32, u32),
}

impl VerseSpan {
    /// Builds a span from a start and optional end. Returns `None` for zero verses or a
    /// reversed range.
    pub fn new(start: u32, end: Option<u32>) -> Option<Self> {
        if start == 0 {
            return None;
        }
        match end {
            None => Some(VerseSpan::Single(start)),
            Some(end) if end < start => None,
            Some(end) => Some(VerseSpan::Range(start, end)),
        }
    }
}

impl fmt::Display for VerseSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerseSpan::Single(v) => write!(f, "{v}"),
            VerseSpan::Range(a, b) => write!(f, "{a}-{b}"),
        }
    }
}

/// The translation word that trailed a reference in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationToken {
    /// Written as `(NIV)` or `[NIV]`; the author clearly meant a translation.
    Delimited(String),
    /// A plain word after the reference. May just be prose ("John 3:16 is ...").
    Bare(String),
}

/// A reference exactly as it appeared in the text, before any resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReference {
    pub book: String,
    pub chapter: u32,
    pub verses: VerseSpan,
    pub translation: Option<TranslationToken>,
}

/// A reference whose book and translation have both been resolved, tied to the request
/// that produced it.
#[derive(Debug, Clone)]
pub struct ResolvedVerse {
    pub book: &'static str,
    pub chapter: u32,
    pub verses: VerseSpan,
    pub translation: String,
    pub user: String,
    pub subreddit: Option<String>,
    pub permalink: String,
}

impl ResolvedVerse {
    /// The tuple two verses are compared on when deduplicating a reply.
    pub fn key(&self) -> (&str, u32, VerseSpan, &str) {
        (self.book, self.chapter, self.verses, &self.translation)
    }

    /// Human-readable reference, e.g. `John 3:16-18`.
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verses)
    }
}

/// Provider text for one resolved verse.
#[derive(Debug, Clone)]
pub struct VerseText {
    pub verse: ResolvedVerse,
    pub text: String,
}
