//! Quiz parser: segments generated text on `Q<n>:` markers and recognizes
//! lettered option lines.

use crate::content::ParseOutcome;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Q(\d+):").expect("quiz marker pattern is valid"));

// Letter is case-insensitive; the [CORRECT] marker is matched literal-case,
// matching long-standing behavior.
static OPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Da-d])\)\s*(.+?)(\s*\[CORRECT\])?$").expect("option pattern is valid")
});

/// One answer option, keyed by its uppercase letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    pub letter: char,
    pub text: String,
    pub correct: bool,
}

/// One parsed multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    /// Ordinal from the `Q<n>:` marker.
    pub number: u32,
    pub question: String,
    /// Options in source order; letters are unique within a question.
    pub options: Vec<QuizOption>,
    /// Letter of the option carrying the `[CORRECT]` marker, if any.
    pub correct_letter: Option<char>,
}

/// Parse quiz text into questions.
///
/// Each `Q<n>:` segment runs until the next marker or end of text. The first
/// line is the question; lines shaped `<letter>) <text>` become options,
/// with an optional trailing `[CORRECT]` marker. A segment contributes a
/// question only with a non-empty question line and at least one option;
/// unrecognized lines are discarded, never errors.
pub fn parse_quiz(text: &str) -> ParseOutcome<Vec<QuizQuestion>> {
    let markers: Vec<_> = MARKER_RE.captures_iter(text).collect();
    let mut questions = Vec::new();

    for (i, marker) in markers.iter().enumerate() {
        let number: u32 = marker[1].parse().unwrap_or_default();
        let segment_start = marker.get(0).map(|m| m.end()).unwrap_or_default();
        let segment_end = markers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());

        if let Some(question) = parse_segment(number, text[segment_start..segment_end].trim()) {
            questions.push(question);
        }
    }

    if questions.is_empty() {
        debug!("no quiz questions recognized, falling back to raw text");
        ParseOutcome::EmptyFallback
    } else {
        ParseOutcome::Parsed(questions)
    }
}

fn parse_segment(number: u32, segment: &str) -> Option<QuizQuestion> {
    let mut lines = segment.lines();
    let question = lines.next()?.trim().to_string();

    let mut options: Vec<QuizOption> = Vec::new();
    for line in lines {
        let Some(caps) = OPTION_RE.captures(line.trim()) else {
            continue;
        };
        let Some(letter) = caps[1].chars().next().map(|c| c.to_ascii_uppercase()) else {
            continue;
        };
        let text = caps[2].trim().to_string();
        let correct = caps.get(3).is_some();

        // Letters are unique per question; a repeated letter replaces the
        // earlier option in place.
        if let Some(existing) = options.iter_mut().find(|o| o.letter == letter) {
            existing.text = text;
            existing.correct = correct;
        } else {
            options.push(QuizOption {
                letter,
                text,
                correct,
            });
        }
    }

    if question.is_empty() || options.is_empty() {
        return None;
    }

    // At most one option may stay flagged; the last marker wins.
    let correct_letter = options.iter().rev().find(|o| o.correct).map(|o| o.letter);
    for option in &mut options {
        option.correct = Some(option.letter) == correct_letter;
    }

    Some(QuizQuestion {
        number,
        question,
        options,
        correct_letter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> Vec<QuizQuestion> {
        parse_quiz(text).parsed().expect("expected a parsed quiz")
    }

    #[test]
    fn single_question_with_correct_marker() {
        let questions = parsed("Q1: What is 2+2?\nA) 3\nB) 4 [CORRECT]\nC) 5\nD) 6");
        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.number, 1);
        assert_eq!(q.question, "What is 2+2?");
        assert_eq!(q.options.len(), 4);
        assert_eq!(q.correct_letter, Some('B'));
        assert_eq!(q.options[1].text, "4");
        assert!(q.options[1].correct);
        assert!(!q.options[0].correct);
    }

    #[test]
    fn multiple_questions_keep_source_order() {
        let text = "Q1: First?\nA) yes [CORRECT]\nB) no\n\nQ2: Second?\nA) up\nB) down [CORRECT]";
        let questions = parsed(text);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].number, 1);
        assert_eq!(questions[1].number, 2);
        assert_eq!(questions[1].correct_letter, Some('B'));
    }

    #[test]
    fn lowercase_option_letters_are_normalized() {
        let questions = parsed("Q1: Pick one\na) first\nb) second [CORRECT]");
        assert_eq!(questions[0].options[0].letter, 'A');
        assert_eq!(questions[0].correct_letter, Some('B'));
    }

    #[test]
    fn correct_marker_is_literal_case() {
        let questions = parsed("Q1: Pick one\nA) first [correct]\nB) second");
        // Lowercase marker is not recognized; it stays part of the option text.
        assert_eq!(questions[0].correct_letter, None);
        assert_eq!(questions[0].options[0].text, "first [correct]");
    }

    #[test]
    fn unrecognized_lines_are_discarded() {
        let text = "Q1: A question?\nHere are your choices:\nA) one [CORRECT]\nB) two\n(choose wisely)";
        let questions = parsed(text);
        assert_eq!(questions[0].options.len(), 2);
    }

    #[test]
    fn segment_without_options_is_dropped() {
        let text = "Q1: An essay question with no options.\n\nQ2: Real one?\nA) yes [CORRECT]\nB) no";
        let questions = parsed(text);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].number, 2);
    }

    #[test]
    fn duplicate_letter_replaces_in_place() {
        let questions = parsed("Q1: Pick\nA) old\nB) other\nA) new [CORRECT]");
        let q = &questions[0];
        assert_eq!(q.options.len(), 2);
        assert_eq!(q.options[0].letter, 'A');
        assert_eq!(q.options[0].text, "new");
        assert_eq!(q.correct_letter, Some('A'));
    }

    #[test]
    fn no_markers_is_empty_fallback() {
        assert!(parse_quiz("just prose, no questions").is_empty_fallback());
    }

    #[test]
    fn correct_letter_matches_exactly_one_flagged_option() {
        let questions = parsed("Q1: Pick\nA) one [CORRECT]\nB) two [CORRECT]");
        let q = &questions[0];
        let flagged: Vec<_> = q.options.iter().filter(|o| o.correct).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(q.correct_letter, Some(flagged[0].letter));
    }
}
