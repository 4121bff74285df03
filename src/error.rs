//! Unified error handling for the rozklad crate
//!
//! Library operations return [`Result`] over [`Error`], which wraps the
//! domain-specific errors of the document readers and adds the conditions
//! the conversion pipeline treats as fatal. Every error is classified into
//! an [`ErrorCategory`] so the command layer can report it uniformly.
//!
//! There is no retry logic anywhere in the pipeline: any error surfaced here
//! aborts the current run.

use std::io;
use thiserror::Error;

pub use crate::source::SourceError;

/// Classification of errors for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Reading or decoding a source document
    Input,
    /// Table structure or schedule content
    Parsing,
    /// Reading or writing schedule files
    Storage,
    /// Invalid settings
    Config,
    /// Anything without a better home
    Other,
}

impl ErrorCategory {
    /// Short human-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Parsing => "parsing",
            Self::Storage => "storage",
            Self::Config => "config",
            Self::Other => "other",
        }
    }
}

/// Unified error type for the rozklad crate
#[derive(Error, Debug)]
pub enum Error {
    /// Document could not be converted into a table
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Table lacks the structure every timetable has
    #[error("Malformed table in {document}: {reason}")]
    MalformedTable { document: String, reason: String },

    /// No column of the document looks like a student group
    #[error("No group columns found in {document}")]
    NoGroupColumns { document: String },

    /// Filesystem failure while writing or moving schedule files
    #[error("Filesystem error: {0}")]
    Io(#[from] io::Error),

    /// Schedule file could not be encoded or decoded
    #[error("Schedule JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failure described by a message, optionally wrapping its cause
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a malformed-table error
    pub fn malformed(document: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTable {
            document: document.into(),
            reason: reason.into(),
        }
    }

    /// Error carrying only a message
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Error with a message and the underlying cause
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Source(_) => ErrorCategory::Input,
            Self::MalformedTable { .. } | Self::NoGroupColumns { .. } => ErrorCategory::Parsing,
            Self::Io(_) | Self::Json(_) => ErrorCategory::Storage,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
