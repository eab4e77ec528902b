//! Notes formatter: converts lightly-marked-up model output into
//! presentation HTML.

use regex::Regex;
use std::sync::LazyLock;

static H5_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### (.+)$").expect("h5 pattern is valid"));
static H4_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (.+)$").expect("h4 pattern is valid"));
static H3_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").expect("h3 pattern is valid"));
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("italic pattern is valid"));
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- (.+)$").expect("bullet pattern is valid"));
static LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<li>.*</li>\n?)+").expect("list pattern is valid"));

/// Reformat notes text into HTML.
///
/// The transform order is significant: headers (deepest first, so `###` is
/// not partially consumed by `#`), then emphasis (bold before italic, so
/// `**` is not eaten by `*`), then bullets with consecutive items wrapped in
/// a list, and finally line breaks. Reordering any pass corrupts the markup
/// produced by the ones before it.
pub fn format_notes(text: &str) -> String {
    let content = H5_RE.replace_all(text, "<h5>$1</h5>");
    let content = H4_RE.replace_all(&content, "<h4>$1</h4>");
    let content = H3_RE.replace_all(&content, "<h3>$1</h3>");

    let content = BOLD_RE.replace_all(&content, "<strong>$1</strong>");
    let content = ITALIC_RE.replace_all(&content, "<em>$1</em>");

    let content = BULLET_RE.replace_all(&content, "<li>$1</li>");
    let content = LIST_RE.replace_all(&content, |caps: &regex::Captures<'_>| {
        format!("<ul>{}</ul>", &caps[0])
    });

    // Line breaks last: a `<br />` goes in before each newline, and the
    // newline itself is kept.
    content.replace('\n', "<br />\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_then_list_structure() {
        let html = format_notes("# Title\n- a\n- b");
        let heading = html.find("<h3>Title</h3>").expect("heading present");
        let list = html.find("<ul>").expect("list present");
        assert!(heading < list);
        assert_eq!(html.matches("<li>").count(), 2);
        assert_eq!(html.matches("</ul>").count(), 1);
    }

    #[test]
    fn header_levels_map_depth_to_smaller_headings() {
        let html = format_notes("# One\n## Two\n### Three");
        assert!(html.contains("<h3>One</h3>"));
        assert!(html.contains("<h4>Two</h4>"));
        assert!(html.contains("<h5>Three</h5>"));
        // Deeper markers must not be half-eaten by shallower patterns.
        assert!(!html.contains("<h3>#"));
        assert!(!html.contains("<h4>#"));
    }

    #[test]
    fn bold_before_italic() {
        let html = format_notes("**key term** and *emphasis*");
        assert!(html.contains("<strong>key term</strong>"));
        assert!(html.contains("<em>emphasis</em>"));
        assert!(!html.contains("<em><em>"));
    }

    #[test]
    fn consecutive_bullets_share_one_list() {
        let html = format_notes("- a\n- b\n\ntext\n\n- c");
        assert_eq!(html.matches("<ul>").count(), 2);
        assert_eq!(html.matches("<li>").count(), 3);
    }

    #[test]
    fn line_breaks_are_inserted_before_newlines() {
        let html = format_notes("first\nsecond");
        assert_eq!(html, "first<br />\nsecond");
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(format_notes("no markup at all"), "no markup at all");
    }

    #[test]
    fn bold_survives_the_italic_pass() {
        // A lone bold span must not come out wrapped in <em>.
        let html = format_notes("**only bold**");
        assert_eq!(html, "<strong>only bold</strong>");
    }
}
