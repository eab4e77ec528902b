//! Content normalizer: best-effort restructuring of generated text into
//! study artifacts.
//!
//! Quiz and flashcard parsing are tolerant, since models do not always
//! follow formatting instructions, and report [`ParseOutcome::EmptyFallback`]
//! instead of an error when nothing recognizable is found. Callers are
//! expected to fall back to displaying the raw text in that case; the raw
//! text is never lost.

pub mod flashcards;
pub mod notes;
pub mod quiz;

pub use flashcards::{Flashcard, parse_flashcards};
pub use notes::format_notes;
pub use quiz::{QuizOption, QuizQuestion, parse_quiz};

use crate::types::ContentKind;

/// Result of a structured parse.
///
/// `EmptyFallback` means "could not structure the output", distinct from a
/// valid-but-empty parse such as a literal `[]` flashcard array, which is
/// `Parsed(vec![])`.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    Parsed(T),
    EmptyFallback,
}

impl<T> ParseOutcome<T> {
    pub fn is_empty_fallback(&self) -> bool {
        matches!(self, ParseOutcome::EmptyFallback)
    }

    /// The parsed value, if any.
    pub fn parsed(self) -> Option<T> {
        match self {
            ParseOutcome::Parsed(value) => Some(value),
            ParseOutcome::EmptyFallback => None,
        }
    }
}

/// Generated text after normalization for one content kind.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedContent {
    Quiz(Vec<QuizQuestion>),
    Flashcards(Vec<Flashcard>),
    /// Notes reformatted into presentation markup.
    Notes(String),
    /// Verbatim text: summaries, or the fallback when structuring failed.
    Raw(String),
}

/// Apply the normalizer path for a content kind.
///
/// Structured kinds degrade to [`NormalizedContent::Raw`] when parsing finds
/// nothing, preserving the generated text for display.
pub fn normalize(kind: ContentKind, text: &str) -> NormalizedContent {
    match kind {
        ContentKind::Quiz => match parse_quiz(text) {
            ParseOutcome::Parsed(questions) => NormalizedContent::Quiz(questions),
            ParseOutcome::EmptyFallback => NormalizedContent::Raw(text.to_string()),
        },
        ContentKind::Flashcards => match parse_flashcards(text) {
            ParseOutcome::Parsed(cards) => NormalizedContent::Flashcards(cards),
            ParseOutcome::EmptyFallback => NormalizedContent::Raw(text.to_string()),
        },
        ContentKind::Notes => NormalizedContent::Notes(format_notes(text)),
        ContentKind::Summary => NormalizedContent::Raw(text.to_string()),
    }
}
