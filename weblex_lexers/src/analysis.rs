//! Content heuristics shared by the markup languages

use regex::{Regex, RegexBuilder};
use std::sync::OnceLock;

/// Only this many bytes are searched for a tag pair
const TAG_SEARCH_LIMIT: usize = 1000;

static DOCTYPE: OnceLock<Option<Regex>> = OnceLock::new();
static TAG_PAIR: OnceLock<Option<Regex>> = OnceLock::new();
static HTML_DOCTYPE: OnceLock<Option<Regex>> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .ok()
    })
    .as_ref()
}

/// Optional processing instruction, then `<!DOCTYPE name name "id" ...>` at the start of `text`
fn doctype_regex() -> Option<&'static Regex> {
    compiled(
        &DOCTYPE,
        r#"^(<\?.*?\?>)?\s*<!DOCTYPE\s+([a-zA-Z_][a-zA-Z0-9]*\s+[a-zA-Z_][a-zA-Z0-9]*\s+"[^"]*")[^>]*>"#,
    )
}

/// Declaration part of a leading doctype, e.g. `html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN"`
pub fn doctype(text: &str) -> Option<&str> {
    doctype_regex()?
        .captures(text)
        .and_then(|captures| captures.get(2))
        .map(|declaration| declaration.as_str().trim())
}

/// True when the leading doctype's declaration starts with a match of `pattern`
pub fn doctype_matches(text: &str, pattern: &Regex) -> bool {
    doctype(text)
        .and_then(|declaration| pattern.find(declaration))
        .is_some_and(|found| found.start() == 0)
}

pub fn html_doctype_matches(text: &str) -> bool {
    compiled(&HTML_DOCTYPE, r#"html\s+PUBLIC\s+"-//W3C//DTD X?HTML.*"#)
        .is_some_and(|pattern| doctype_matches(text, pattern))
}

/// A leading doctype, or an open/close tag pair near the start
pub fn looks_like_xml(text: &str) -> bool {
    if doctype(text).is_some() {
        return true;
    }

    let mut end = text.len().min(TAG_SEARCH_LIMIT);
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    compiled(&TAG_PAIR, r"<(.+?)(\s.*?)?>.*?</.+?>")
        .is_some_and(|pattern| pattern.is_match(&text[..end]))
}

/// Keep a heuristic score inside `[0, 1]`
pub fn clamp_score(score: f32) -> f32 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
