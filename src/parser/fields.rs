//! Field extraction from a single timetable cell
//!
//! A cell is free text such as `Л.203 Фізика доц. Іванов І. П.`, possibly
//! holding several classes at once. Extraction is a fixed sequence of
//! find/record/strip passes, each a pure function returning the recorded
//! value and the residual text:
//!
//! 1. rooms are found and removed
//! 2. qualifications are found in what is left and removed
//! 3. teacher names are found after their qualification (on the text from
//!    step 1) and their literal text is removed from the residual of step 2
//! 4. the residual is the class name
//!
//! Multiple matches of one kind are joined with [`FIELD_SEPARATOR`].

use regex::Regex;

use super::patterns::{QUALIFICATION_REGEX, ROOM_REGEX, TEACHER_REGEX};
use super::sanitize::normalize_optional;
use crate::models::FIELD_SEPARATOR;

/// Structured fields recovered from one cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CellFields {
    /// Class name (whatever text is not a room, rank or teacher)
    pub name: Option<String>,
    pub room: Option<String>,
    pub qualification: Option<String>,
    pub teacher: Option<String>,
}

impl CellFields {
    /// True when the cell yielded no class name
    pub fn is_blank(&self) -> bool {
        self.name.is_none()
    }
}

/// Run every extraction pass over one cell
///
/// # Examples
///
/// ```
/// use rozklad::parser::extract_fields;
///
/// let fields = extract_fields("Л.203 Фізика доц. Іванов І. П.");
/// assert_eq!(fields.room.as_deref(), Some("Л.203"));
/// assert_eq!(fields.qualification.as_deref(), Some("доц."));
/// assert_eq!(fields.teacher.as_deref(), Some("Іванов І. П."));
/// assert_eq!(fields.name.as_deref(), Some("Фізика"));
/// ```
pub fn extract_fields(cell: &str) -> CellFields {
    let (room, without_rooms) = extract_rooms(cell);
    let (qualification, without_qualifications) = extract_qualifications(&without_rooms);
    let (teacher, names) = extract_teachers(&without_rooms);
    let residual = strip_literals(&without_qualifications, &names);

    CellFields {
        name: normalize_optional(&residual),
        room: room.as_deref().and_then(normalize_optional),
        qualification: qualification.as_deref().and_then(normalize_optional),
        teacher: teacher.as_deref().and_then(normalize_optional),
    }
}

/// Record every room code and remove them from the text
pub fn extract_rooms(text: &str) -> (Option<String>, String) {
    find_and_strip(&ROOM_REGEX, text)
}

/// Record every qualification token and remove them from the text
pub fn extract_qualifications(text: &str) -> (Option<String>, String) {
    find_and_strip(&QUALIFICATION_REGEX, text)
}

/// Record the names that follow a qualification token
///
/// Returns the joined field and the individual names, which the caller
/// strips from its residual text.
pub fn extract_teachers(text: &str) -> (Option<String>, Vec<String>) {
    let names: Vec<String> = TEACHER_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().to_string())
        .collect();

    (join_matches(&names), names)
}

/// Remove every occurrence of each literal from the text
pub fn strip_literals(text: &str, literals: &[String]) -> String {
    literals
        .iter()
        .filter(|literal| !literal.is_empty())
        .fold(text.to_string(), |acc, literal| acc.replace(literal.as_str(), ""))
}

fn find_and_strip(regex: &Regex, text: &str) -> (Option<String>, String) {
    let found: Vec<String> = regex
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();
    let residual = regex.replace_all(text, "").into_owned();

    (join_matches(&found), residual)
}

fn join_matches(found: &[String]) -> Option<String> {
    (!found.is_empty()).then(|| found.join(&FIELD_SEPARATOR.to_string()))
}
