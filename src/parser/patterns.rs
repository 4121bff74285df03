//! Regex catalogue for timetable cell text
//!
//! Cells are free text in Ukrainian. The patterns here recognise room codes,
//! teacher rank abbreviations and teacher names. Ukrainian letters do not fit
//! a plain `[А-Я]` range: `Ґ Є І Ї` live outside the basic Cyrillic block and
//! `Ъ Ы Э` inside it are not Ukrainian, so both cases are spelled out.

use regex::Regex;
use std::sync::LazyLock;

/// Ukrainian uppercase letters
pub const UPPERCASE: &str = "[А-ЩЬЮЯҐЄІЇ]";

/// Ukrainian lowercase letters
pub const LOWERCASE: &str = "[а-щьюяґєії]";

/// Teacher rank abbreviations, as regex fragments
///
/// Order matters: alternation is leftmost-first, so an abbreviation that
/// contains another (`ст.викл.` vs `викл.`, `ст. ас.` vs `ас.`) is listed
/// before it.
pub const QUALIFICATIONS: &[&str] = &[
    r"доц\.",
    r"ст\.викл\.",
    r"проф\.",
    r"ст\. в\.",
    r"викл\.",
    r"ст\.пр\.",
    r"пр\.",
    r"ст\. ас\.",
    r"ас\.",
];

/// Room code: one word character, a period, 1-5 digits, an optional short
/// suffix and optional `/n` parts (`Л.203`, `а.403/2`, `Г. 12а`)
pub static ROOM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\w\. ?\d{1,5}\w{0,5}(?:/\d)*)\b").unwrap());

/// Any qualification token
pub static QUALIFICATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&qualification_pattern()).unwrap());

/// A qualification followed by a capitalised surname and optional initials;
/// capture group 1 is the name
pub static TEACHER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"{qualification} ({UPPERCASE}{LOWERCASE}+(?: {UPPERCASE}\.)*)",
        qualification = qualification_pattern()
    ))
    .unwrap()
});

/// Student group identifier inside a column header (`КН-41`, `ТП-5м`)
pub static GROUP_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w{1,2}-\d{1,2}").unwrap());

/// Pandas-style duplicate header suffix (`.1`, `.2`)
pub static DUPLICATE_SUFFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.(\d)").unwrap());

/// First run of digits in a period cell
pub static PERIOD_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

fn qualification_pattern() -> String {
    format!(r"\b(?:{})", QUALIFICATIONS.join("|"))
}
