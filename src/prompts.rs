//! Prompt templates for each content kind and the prompt builder.
//!
//! The templates instruct the model to emit the formats the content
//! normalizer understands: `Q<n>:`/`A)`-style questions with a `[CORRECT]`
//! marker for quizzes, and a JSON array of `{front, back}` pairs for
//! flashcards. Changing a template here without updating the matching
//! parser in [`content`](crate::content) will break structured parsing.

use crate::types::ContentKind;

/// Fixed system instruction sent with every OpenAI-compatible request.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful study assistant that creates educational content.";

/// Prefix used when the request carries only an image and no extracted text.
pub const IMAGE_PREAMBLE: &str =
    "First, extract and read the text/content from this document image. Then, ";

const SUMMARY_PROMPT: &str = "Summarize the following document in clear, concise bullet points for studying. Focus on the key concepts, main ideas, and important details:\n\n";

const NOTES_PROMPT: &str = "Create detailed study notes from the following content. Include:\n- Clear headings and subheadings\n- Key terms with definitions\n- Important concepts explained\n- Relationships between ideas\n\nContent:\n\n";

const QUIZ_PROMPT: &str = "Generate 10 multiple-choice questions based on the following content. For each question:\n- Provide 4 answer options (A, B, C, D)\n- Mark the correct answer with [CORRECT]\n- Make questions test understanding, not just memorization\n\nFormat example:\nQ1: What is...?\nA) Option 1\nB) Option 2 [CORRECT]\nC) Option 3\nD) Option 4\n\nContent:\n\n";

const FLASHCARDS_PROMPT: &str = "Create 15 flashcard pairs from the following content. Return as JSON array:\n[{\"front\": \"question or term\", \"back\": \"answer or definition\"}]\n\nFocus on key concepts, definitions, and important facts.\n\nContent:\n\n";

/// Default prompt template for a content kind.
pub fn default_prompt(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Summary => SUMMARY_PROMPT,
        ContentKind::Notes => NOTES_PROMPT,
        ContentKind::Quiz => QUIZ_PROMPT,
        ContentKind::Flashcards => FLASHCARDS_PROMPT,
    }
}

/// Build the full prompt for one generation call.
///
/// A non-empty `custom_prompt` replaces the default template. When the
/// source is an image with no extracted text (`image_only`), the template is
/// prefixed with an extraction instruction so the model reads the document
/// before producing content. The source text is appended last.
pub fn build_prompt(
    kind: ContentKind,
    custom_prompt: Option<&str>,
    source_text: &str,
    image_only: bool,
) -> String {
    let base = match custom_prompt {
        Some(custom) if !custom.is_empty() => custom.to_string(),
        _ => default_prompt(kind).to_string(),
    };

    let base = if image_only {
        format!("{IMAGE_PREAMBLE}{}", lowercase_first(&base))
    } else {
        base
    };

    format!("{base}{source_text}")
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
