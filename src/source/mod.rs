//! Document → table conversion
//!
//! Timetable documents reach the pipeline only as a [`Table`]. This module
//! holds the readers that produce those tables and the discovery of source
//! documents in an input directory.
//!
//! - [`docx`] - Word documents (first table of `word/document.xml`)
//! - [`html`] - HTML exports (first `<table>` element)

pub mod docx;
pub mod html;

pub use docx::DocxReader;
pub use html::HtmlReader;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::table::Table;

/// Errors raised while turning a document into a table
#[derive(Error, Debug)]
pub enum SourceError {
    /// Document could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// DOCX container is not a valid ZIP archive or lacks the document part
    #[error("Invalid DOCX container {path}: {source}")]
    Zip {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// Document XML is malformed
    #[error("Malformed document XML in {path}: {source}")]
    Xml {
        path: String,
        #[source]
        source: quick_xml::Error,
    },

    /// Document contains no table
    #[error("No table found in {path}")]
    NoTable { path: String },

    /// File extension has no reader
    #[error("Unsupported document format: {path}")]
    UnsupportedFormat { path: String },
}

/// Result type for document readers
pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Upper bound for a single span or skip count read from a document
pub const MAX_SPAN: usize = 256;

/// Something that converts a document on disk into a table
pub trait TableSource {
    /// Read the schedule table of the document at `path`
    fn read_table(&self, path: &Path) -> SourceResult<Table>;
}

/// Pick a reader by file extension and read the document's table
pub fn load_table(path: &Path) -> SourceResult<Table> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "docx" => DocxReader::new().read_table(path),
        "html" | "htm" => HtmlReader::new().read_table(path),
        _ => Err(SourceError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// List source documents in `dir`, in file-name order
///
/// Keeps files whose extension is in `extensions` (case-insensitive) and
/// skips editor lock files (`~$name.docx`).
pub fn discover_documents(dir: &Path, extensions: &[String]) -> SourceResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| SourceError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut documents: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| !name.starts_with("~$"))
        })
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        })
        .collect();

    documents.sort();
    Ok(documents)
}

/// Strip zero-width formatting characters word processors leave in text
pub(crate) fn remove_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{00AD}' |
                '\u{200B}'..='\u{200F}' |
                '\u{2060}' |
                '\u{FEFF}'
            )
        })
        .collect()
}
