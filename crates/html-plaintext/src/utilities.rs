//! Text and link helpers shared by the renderer.

use once_cell::sync::Lazy;
use regex::Regex;

static ABSOLUTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z]+://[a-z0-9]").expect("valid absolute URL pattern"));

static URL_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:[a-z][a-z0-9+.-]*://|mailto:)").expect("valid scheme pattern"));

/// Characters that let the next text chunk drop its leading space
pub const BREAKING_WHITESPACE: &[char] = &[' ', '\n', '\r'];

/// Collapse every run of ASCII whitespace (newlines included) to a single space
pub fn collapse_whitespace(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut prev_was_whitespace = false;

    for c in s.chars() {
        if c.is_ascii_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
                prev_was_whitespace = true;
            }
        } else {
            result.push(c);
            prev_was_whitespace = false;
        }
    }

    result
}

/// Trim, unify line endings and cap newline runs at two
pub fn finalize(output: &str) -> String {
    let trimmed = output.trim_matches(|c: char| c.is_ascii_whitespace() || c == '\0');
    let normalized = trimmed.replace("\r\n", "\n").replace('\r', "\n");

    let mut newline_count = 0;
    let mut processed = String::with_capacity(normalized.len());

    for c in normalized.chars() {
        if c == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                processed.push(c);
            }
        } else {
            newline_count = 0;
            processed.push(c);
        }
    }

    processed
}

/// `scheme://` followed by at least one alphanumeric character
pub fn is_absolute_url(href: &str) -> bool {
    ABSOLUTE_URL.is_match(href)
}

/// Whether a link's visible text already spells out its `href`
pub fn duplicates_href(href: &str, text: &str) -> bool {
    if text == href {
        return true;
    }
    URL_SCHEME
        .find(href)
        .is_some_and(|scheme| &href[scheme.end()..] == text)
}
