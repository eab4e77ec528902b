//! Flashcard parser: pulls a JSON array of `{front, back}` pairs out of
//! generated text that usually surrounds it with prose.

use crate::content::ParseOutcome;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

// Greedy: first `[` through the last `]`, newlines included.
static ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("array pattern is valid"));

/// One flashcard pair. Order-preserving, no uniqueness constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// Parse flashcard text.
///
/// First attempt: the first bracketed-array substring, parsed as JSON. If
/// that fails, the entire text is tried directly. If both fail this returns
/// [`ParseOutcome::EmptyFallback`] (silent degradation, not an error) and
/// callers display the raw text instead.
pub fn parse_flashcards(text: &str) -> ParseOutcome<Vec<Flashcard>> {
    if let Some(candidate) = ARRAY_RE.find(text) {
        if let Ok(cards) = serde_json::from_str::<Vec<Flashcard>>(candidate.as_str()) {
            return ParseOutcome::Parsed(cards);
        }
    }

    if let Ok(cards) = serde_json::from_str::<Vec<Flashcard>>(text) {
        return ParseOutcome::Parsed(cards);
    }

    debug!("no flashcard array recognized, falling back to raw text");
    ParseOutcome::EmptyFallback
}
