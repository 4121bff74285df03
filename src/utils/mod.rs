//! Common utilities and helper functions

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Sanitize filename by replacing characters invalid on common filesystems
///
/// Control characters are replaced too. Trailing dots are kept, so a
/// teacher such as `Іванов І. П.` maps to `Іванов І. П..json` and the file
/// stem equals the name. A name that would resolve to `.`, `..` or nothing
/// becomes `_`.
pub fn sanitize_filename(filename: &str) -> String {
    static INVALID_CHARS: OnceLock<Regex> = OnceLock::new();

    let re = INVALID_CHARS
        .get_or_init(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).expect("Invalid regex pattern"));

    let replaced = re.replace_all(filename.trim(), "_");

    match replaced.as_ref() {
        "" | "." | ".." => "_".to_string(),
        name => name.to_string(),
    }
}

/// File name of a path for log and error messages
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
