//! JSON persistence of schedules
//!
//! Every schedule is one pretty-printed JSON file named after its group or
//! teacher. [`ScheduleStore`] writes them; [`load_group_schedules`] reads a
//! group output tree back for teacher aggregation. [`folders`] holds the
//! optional post-run pass that batches group files into subdirectories.

pub mod folders;

pub use folders::group_into_folders;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::{GroupSchedule, TeacherSchedule, WeeklySchedule};
use crate::utils::sanitize_filename;

/// Extension of schedule files
pub const SCHEDULE_EXTENSION: &str = "json";

const INDENT: &[u8] = b"    ";

/// Writes schedule files into one directory
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    output_dir: PathBuf,
}

impl ScheduleStore {
    /// Open a store, creating `output_dir` if needed
    ///
    /// # Example
    /// ```no_run
    /// use rozklad::storage::ScheduleStore;
    /// use std::path::Path;
    ///
    /// let store = ScheduleStore::new(Path::new("./output_json")).unwrap();
    /// ```
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir).map_err(|e| {
            Error::with_source(
                format!("Failed to create output directory {}", output_dir.display()),
                e,
            )
        })?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File path used for a group or teacher name
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{SCHEDULE_EXTENSION}", sanitize_filename(key)))
    }

    /// Write one schedule under `key`, replacing any previous file
    pub fn save(&self, key: &str, schedule: &WeeklySchedule) -> Result<PathBuf> {
        let path = self.path_for(key);
        let json = to_pretty_json(schedule)?;

        fs::write(&path, json).map_err(|e| {
            Error::with_source(format!("Failed to write {}", path.display()), e)
        })?;

        tracing::debug!(path = %path.display(), "Saved schedule");
        Ok(path)
    }

    pub fn save_group(&self, group: &GroupSchedule) -> Result<PathBuf> {
        self.save(&group.group, &group.schedule)
    }

    pub fn save_teacher(&self, teacher: &TeacherSchedule) -> Result<PathBuf> {
        self.save(&teacher.teacher, &teacher.schedule)
    }

    /// Check if a schedule file already exists for `key`
    pub fn exists(&self, key: &str) -> bool {
        self.path_for(key).exists()
    }
}

/// Serialize with 4-space indentation, non-ASCII left as is
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;

    String::from_utf8(buffer).map_err(|e| Error::with_source("Serialized JSON is not UTF-8", e))
}

/// Read one schedule file
pub fn load_schedule(path: &Path) -> Result<WeeklySchedule> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::with_source(format!("Failed to read {}", path.display()), e))?;

    serde_json::from_str(&text)
        .map_err(|e| Error::with_source(format!("Invalid schedule file {}", path.display()), e))
}

/// Read every group schedule under `dir`, recursively, in path order
///
/// The group name is the file stem.
pub fn load_group_schedules(dir: &Path) -> Result<Vec<GroupSchedule>> {
    let mut paths = Vec::new();
    collect_schedule_files(dir, &mut paths)?;
    paths.sort();

    paths
        .into_iter()
        .filter_map(|path| {
            let group = path.file_stem()?.to_str()?.to_string();
            Some((group, path))
        })
        .map(|(group, path)| {
            tracing::debug!(group = %group, path = %path.display(), "Loading group schedule");
            load_schedule(&path).map(|schedule| GroupSchedule::new(group, schedule))
        })
        .collect()
}

fn collect_schedule_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir)
        .map_err(|e| Error::with_source(format!("Failed to list {}", dir.display()), e))?;

    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_schedule_files(&path, out)?;
        } else if is_schedule_file(&path) {
            out.push(path);
        }
    }
    Ok(())
}

pub(crate) fn is_schedule_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SCHEDULE_EXTENSION))
}
