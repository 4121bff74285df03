//! Configuration management for rozklad
//!
//! Values are layered, lowest precedence first: built-in defaults, a TOML
//! file, `ROZKLAD_*` environment variables, then command-line flags (applied
//! by the command layer).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::pipeline::PipelineConfig;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source documents
    pub input: InputConfig,

    /// Schedule output
    pub output: OutputConfig,

    /// Cell and row extraction
    pub extraction: ExtractionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Source document configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Directory holding timetable documents
    pub documents_dir: PathBuf,

    /// Accepted file extensions (`docx`, `html`, `htm`)
    pub extensions: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for group schedules
    pub groups_dir: PathBuf,

    /// Directory for teacher schedules
    pub teachers_dir: PathBuf,

    /// Batch group files into `groupN` folders after parsing
    pub group_into_folders: bool,

    /// Group files per folder
    pub schedules_per_folder: usize,
}

/// Extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Similarity (0-100) a misspelled weekday must exceed to be corrected
    pub day_similarity_threshold: u8,

    /// Cells whose class name starts with this are empty slots
    pub placeholder_prefix: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            documents_dir: PathBuf::from("./word_schedules"),
            extensions: vec![String::from("docx")],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            groups_dir: PathBuf::from("./output_json"),
            teachers_dir: PathBuf::from("./teachers_output_json"),
            group_into_folders: false,
            schedules_per_folder: 20,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            day_similarity_threshold: 80,
            placeholder_prefix: String::from("---"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables over the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Defaults, then the config file (explicit path, or `config.toml` if
    /// present), then environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env()?;
        Ok(config)
    }

    /// Override values with `ROZKLAD_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(dir) = env_var("ROZKLAD_DOCUMENTS_DIR") {
            self.input.documents_dir = dir.into();
        }
        if let Some(extensions) = env_var("ROZKLAD_EXTENSIONS") {
            self.input.extensions = extensions
                .split(',')
                .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect();
        }
        if let Some(dir) = env_var("ROZKLAD_OUTPUT_DIR") {
            self.output.groups_dir = dir.into();
        }
        if let Some(dir) = env_var("ROZKLAD_TEACHERS_DIR") {
            self.output.teachers_dir = dir.into();
        }
        if let Some(value) = env_var("ROZKLAD_GROUP_INTO_FOLDERS") {
            self.output.group_into_folders = parse_bool(&value)
                .with_context(|| format!("Invalid ROZKLAD_GROUP_INTO_FOLDERS: {value}"))?;
        }
        if let Some(value) = env_var("ROZKLAD_SCHEDULES_PER_FOLDER") {
            self.output.schedules_per_folder = value
                .parse()
                .with_context(|| format!("Invalid ROZKLAD_SCHEDULES_PER_FOLDER: {value}"))?;
        }
        if let Some(value) = env_var("ROZKLAD_DAY_SIMILARITY_THRESHOLD") {
            self.extraction.day_similarity_threshold = value
                .parse()
                .with_context(|| format!("Invalid ROZKLAD_DAY_SIMILARITY_THRESHOLD: {value}"))?;
        }
        if let Some(prefix) = env_var("ROZKLAD_PLACEHOLDER_PREFIX") {
            self.extraction.placeholder_prefix = prefix;
        }
        if let Some(level) = env_var("ROZKLAD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = env_var("ROZKLAD_LOG_FORMAT") {
            self.logging.format = format;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.input.extensions.is_empty() {
            anyhow::bail!("input.extensions must list at least one extension");
        }

        if self.output.schedules_per_folder == 0 {
            anyhow::bail!("schedules_per_folder must be greater than 0");
        }

        if self.extraction.day_similarity_threshold > 100 {
            anyhow::bail!("day_similarity_threshold must be between 0 and 100");
        }

        if self.extraction.placeholder_prefix.is_empty() {
            anyhow::bail!("placeholder_prefix must not be empty");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("logging.format must be 'text' or 'json'");
        }

        Ok(())
    }

    /// Settings for the document conversion pipeline
    #[must_use]
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            documents_dir: self.input.documents_dir.clone(),
            extensions: self.input.extensions.clone(),
            output_dir: self.output.groups_dir.clone(),
            group_into_folders: self.output.group_into_folders,
            schedules_per_folder: self.output.schedules_per_folder,
            similarity_threshold: self.extraction.day_similarity_threshold,
            placeholder_prefix: self.extraction.placeholder_prefix.clone(),
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("expected a boolean"),
    }
}
