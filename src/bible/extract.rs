//! Finds scripture references in free-form message text.
//!
//! A reference looks like `<book> <chapter>:<verse>[-<verse>] [<translation>]`, matched
//! case-insensitively. Candidates that match the shape but carry impossible numbers (zero,
//! overflow, reversed ranges) are skipped and the scan carries on after them.

use super::verse::{RawReference, TranslationToken, VerseSpan};
use regex::{Captures, Regex};
use std::iter::FusedIterator;
use std::sync::LazyLock;

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?P<book>(?:[1-3]\s?)?[a-z][a-z.]*(?:\s+of\s+(?:solomon|songs))?)\s*(?P<chapter>\d+):(?P<start>\d+)(?:\s*-\s*(?P<end>\d+))?\b",
    )
    .expect("reference pattern compiles")
});

// Anchored at the end of a reference match. Only looked at, never consumed, so the word is
// still available as the book of a following reference.
// Codes may carry one hyphenated suffix (`oeb-us`).
static TRAILING_TRANSLATION: LazyLock<Regex> = LazyLock::new(|| {
    const CODE: &str = r"[a-z][a-z0-9]{1,11}(?:-[a-z0-9]{1,11})?";
    Regex::new(&format!(
        r"(?i)^[ \t]*(?:\((?P<paren>{CODE})\)|\[(?P<bracket>{CODE})\]|(?P<bare>{CODE})\b)"
    ))
    .expect("translation pattern compiles")
});

/// Lazily yields every valid reference in `text`, left to right.
///
/// The iterator is cheap to clone; a clone restarts from wherever the original was.
pub fn extract(text: &str) -> References<'_> {
    References { text, pos: 0 }
}

#[derive(Debug, Clone)]
pub struct References<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> Iterator for References<'t> {
    type Item = RawReference;

    fn next(&mut self) -> Option<RawReference> {
        while self.pos < self.text.len() {
            let caps = REFERENCE.captures_at(self.text, self.pos)?;
            let whole = caps.get(0)?;
            self.pos = whole.end().max(self.pos + 1);
            if let Some(reference) = build(&caps, &self.text[whole.end()..]) {
                return Some(reference);
            }
        }
        None
    }
}

impl FusedIterator for References<'_> {}

fn build(caps: &Captures<'_>, rest: &str) -> Option<RawReference> {
    let book = unglue(caps.name("book")?.as_str().trim());
    let chapter: u32 = caps.name("chapter")?.as_str().parse().ok()?;
    if chapter == 0 {
        return None;
    }
    let start: u32 = caps.name("start")?.as_str().parse().ok()?;
    let end = match caps.name("end") {
        Some(m) => Some(m.as_str().parse::<u32>().ok()?),
        None => None,
    };
    let verses = VerseSpan::new(start, end)?;
    Some(RawReference {
        book: book.to_string(),
        chapter,
        verses,
        translation: trailing_translation(rest),
    })
}

/// Drops a word glued on with a period (`sentence.John` becomes `John`). A trailing period
/// (`Gen.`) or one inside an abbreviation followed by a space is left alone.
fn unglue(book: &str) -> &str {
    book.char_indices()
        .filter(|&(i, c)| c == '.' && book[i + 1..].starts_with(|n: char| n.is_ascii_alphabetic()))
        .last()
        .map_or(book, |(i, _)| &book[i + 1..])
}

fn trailing_translation(rest: &str) -> Option<TranslationToken> {
    let caps = TRAILING_TRANSLATION.captures(rest)?;
    if let Some(m) = caps.name("paren").or_else(|| caps.name("bracket")) {
        return Some(TranslationToken::Delimited(m.as_str().to_string()));
    }
    caps.name("bare")
        .map(|m| TranslationToken::Bare(m.as_str().to_string()))
}
