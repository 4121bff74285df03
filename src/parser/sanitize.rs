//! Text normalization for extracted cell fields
//!
//! Every field pulled out of a timetable cell (class name, room,
//! qualification, teacher) goes through [`normalize_field`] before it is
//! stored.

use regex::Regex;
use std::sync::LazyLock;

// Pre-compiled regex patterns for performance
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static SPACE_BEFORE_PUNCT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.])").unwrap());

/// Normalize one extracted field
///
/// Steps, in order:
/// 1. Trim surrounding whitespace
/// 2. Trim underscores and commas at either end, then whitespace again
/// 3. Collapse whitespace runs to a single space
/// 4. Remove whitespace immediately before a comma or period
///
/// # Examples
///
/// ```
/// use rozklad::parser::sanitize::normalize_field;
///
/// assert_eq!(normalize_field("  Фізика ,  лаб .  ,__ "), "Фізика, лаб.");
/// ```
pub fn normalize_field(text: &str) -> String {
    let trimmed = trim_edges(text);
    let collapsed = collapse_whitespace(trimmed);
    remove_space_before_punctuation(&collapsed)
}

/// Trim whitespace, then `_`/`,`, then whitespace again
///
/// # Examples
///
/// ```
/// use rozklad::parser::sanitize::trim_edges;
///
/// assert_eq!(trim_edges(" ,Фізика_ "), "Фізика");
/// ```
pub fn trim_edges(text: &str) -> &str {
    text.trim().trim_matches(|c| c == '_' || c == ',').trim()
}

/// Collapse whitespace runs (including newlines) to a single space
///
/// # Examples
///
/// ```
/// use rozklad::parser::sanitize::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("Вища\n\tматематика"), "Вища математика");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").to_string()
}

/// Remove whitespace that precedes a comma or a period
pub fn remove_space_before_punctuation(text: &str) -> String {
    SPACE_BEFORE_PUNCT_REGEX.replace_all(text, "$1").to_string()
}

/// Normalize and drop the field if nothing remains
pub fn normalize_optional(text: &str) -> Option<String> {
    let normalized = normalize_field(text);
    has_content(&normalized).then_some(normalized)
}

/// Check if text contains meaningful content
///
/// Returns false if text is empty or only whitespace
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}
