//! Free-text cleanup for scraped vacancy fields.

use std::sync::LazyLock;

use regex::Regex;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("tag pattern is a valid regex"));

/// Strip HTML-like tags and normalize whitespace.
///
/// - Tags (`<...>`, non-greedy, single line) are removed and the result is trimmed.
/// - If line breaks remain, lines are joined with `;`.
/// - Otherwise runs of whitespace collapse to a single space.
pub fn clean_text(text: &str) -> String {
    let stripped = HTML_TAG.replace_all(text, "");
    let trimmed = stripped.trim();
    if trimmed.contains('\n') {
        trimmed.split('\n').collect::<Vec<_>>().join(";")
    } else {
        trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
