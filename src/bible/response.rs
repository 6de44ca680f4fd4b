//! Building one reply out of every verse a message asked for.

use super::catalog::TranslationTable;
use super::fetcher::VerseFetcher;
use super::verse::{ResolvedVerse, VerseText};
use crate::reddit::InboxMessage;
use std::sync::Arc;
use tracing::{debug, warn};

const BLOCK_SEPARATOR: &str = "\n\n";
const TRUNCATION_NOTICE: &str =
    "\n\n*Some quotations were left out because the reply would have been too long for reddit.*";

/// Fixed parts of every reply.
#[derive(Debug, Clone)]
pub struct ReplyLayout {
    pub max_length: usize,
    /// Appended verbatim after the quotations, including its own leading separator.
    pub footer: String,
}

pub struct Response<'a> {
    message: &'a InboxMessage,
    verses: Vec<ResolvedVerse>,
    fetcher: &'a VerseFetcher,
    translations: Arc<TranslationTable>,
    layout: &'a ReplyLayout,
}

impl<'a> Response<'a> {
    pub fn new(
        message: &'a InboxMessage,
        fetcher: &'a VerseFetcher,
        translations: Arc<TranslationTable>,
        layout: &'a ReplyLayout,
    ) -> Self {
        Self {
            message,
            verses: Vec::new(),
            fetcher,
            translations,
            layout,
        }
    }

    pub fn verses(&self) -> &[ResolvedVerse] {
        &self.verses
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    pub fn is_duplicate_verse(&self, candidate: &ResolvedVerse) -> bool {
        self.verses.iter().any(|v| v.key() == candidate.key())
    }

    /// Queue `verse` unless an identical one is already queued. Returns whether it was added.
    pub fn add_verse(&mut self, verse: ResolvedVerse) -> bool {
        if self.is_duplicate_verse(&verse) {
            debug!(target = "response", reference = %verse.reference(), "duplicate verse skipped");
            return false;
        }
        self.verses.push(verse);
        true
    }

    /// Fetch every queued verse and lay the reply out. `None` when nothing could be quoted.
    pub async fn construct_message(&self) -> Option<String> {
        let mut blocks = Vec::with_capacity(self.verses.len());
        for verse in &self.verses {
            if let Some(text) = self.fetcher.fetch(verse).await {
                blocks.push(self.format_block(&text));
            }
        }
        if blocks.is_empty() {
            return None;
        }
        let reply = assemble(&blocks, self.layout);
        if reply.is_none() {
            warn!(
                target = "response",
                author = self.message.author(),
                "first quotation alone exceeds the reply limit"
            );
        }
        reply
    }

    fn format_block(&self, text: &VerseText) -> String {
        let code = text.verse.translation.as_str();
        let name = self.translations.display_name(code).unwrap_or(code);
        format!(
            "**{} | {}**\n\n>{}",
            text.verse.reference(),
            name,
            text.text
        )
    }
}

/// Join quotation blocks and the footer, dropping whole trailing blocks when the result
/// would exceed the layout's limit.
pub fn assemble(blocks: &[String], layout: &ReplyLayout) -> Option<String> {
    let full = blocks.join(BLOCK_SEPARATOR);
    if char_len(&full) + char_len(&layout.footer) <= layout.max_length {
        return Some(full + &layout.footer);
    }
    let budget = layout
        .max_length
        .checked_sub(char_len(TRUNCATION_NOTICE) + char_len(&layout.footer))?;
    let mut body = String::new();
    let mut used = 0;
    for block in blocks {
        let added = if body.is_empty() {
            char_len(block)
        } else {
            char_len(BLOCK_SEPARATOR) + char_len(block)
        };
        if used + added > budget {
            break;
        }
        if !body.is_empty() {
            body.push_str(BLOCK_SEPARATOR);
        }
        body.push_str(block);
        used += added;
    }
    if body.is_empty() {
        return None;
    }
    body.push_str(TRUNCATION_NOTICE);
    body.push_str(&layout.footer);
    Some(body)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
