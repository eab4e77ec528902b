//! Normalizer tests over realistic model output, including the raw-text
//! fallback paths.

use studygen::{ContentKind, NormalizedContent, normalize};

#[test]
fn realistic_quiz_output() {
    let text = "Here are your questions:\n\n\
        Q1: What organelle produces ATP?\n\
        A) Nucleus\n\
        B) Mitochondrion [CORRECT]\n\
        C) Ribosome\n\
        D) Golgi apparatus\n\n\
        Q2: Which process splits glucose?\n\
        a) Glycolysis [CORRECT]\n\
        b) Krebs cycle\n\
        c) Electron transport\n\
        d) Fermentation\n\n\
        Good luck with your studying!";

    let NormalizedContent::Quiz(questions) = normalize(ContentKind::Quiz, text) else {
        panic!("expected structured quiz");
    };
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].correct_letter, Some('B'));
    assert_eq!(questions[0].options.len(), 4);
    assert_eq!(questions[1].correct_letter, Some('A'));
    assert_eq!(questions[1].question, "Which process splits glucose?");
}

#[test]
fn realistic_flashcard_output_in_code_fence() {
    let text = "Here are your flashcards:\n\n```json\n[\n  {\"front\": \"ATP\", \"back\": \"Adenosine triphosphate, the cell's energy currency\"},\n  {\"front\": \"Osmosis\", \"back\": \"Diffusion of water across a membrane\"}\n]\n```\n\nHappy studying!";

    let NormalizedContent::Flashcards(cards) = normalize(ContentKind::Flashcards, text) else {
        panic!("expected structured flashcards");
    };
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].front, "ATP");
}

#[test]
fn realistic_notes_output() {
    let text = "# Cell Biology\n\n## Energy\n\nThe **mitochondrion** is the *powerhouse* of the cell.\n\n- Produces ATP\n- Has its own DNA\n- Divides independently";

    let NormalizedContent::Notes(html) = normalize(ContentKind::Notes, text) else {
        panic!("expected formatted notes");
    };
    assert!(html.contains("<h3>Cell Biology</h3>"));
    assert!(html.contains("<h4>Energy</h4>"));
    assert!(html.contains("<strong>mitochondrion</strong>"));
    assert!(html.contains("<em>powerhouse</em>"));
    assert_eq!(html.matches("<li>").count(), 3);
    assert_eq!(html.matches("<ul>").count(), 1);
}

#[test]
fn quiz_that_ignored_formatting_instructions_degrades_to_raw() {
    let text = "Instead of a quiz, here is an essay about mitochondria. They are fascinating.";
    assert_eq!(
        normalize(ContentKind::Quiz, text),
        NormalizedContent::Raw(text.to_string())
    );
}

#[test]
fn flashcards_without_json_degrade_to_raw() {
    let text = "Front: ATP / Back: energy currency";
    assert_eq!(
        normalize(ContentKind::Flashcards, text),
        NormalizedContent::Raw(text.to_string())
    );
}

#[test]
fn summary_is_never_restructured() {
    let text = "- key point\n- another point";
    assert_eq!(
        normalize(ContentKind::Summary, text),
        NormalizedContent::Raw(text.to_string())
    );
}
