//! Batching of group schedule files into `groupN` folders
//!
//! Runs once after every document has been converted. Lists the `.json`
//! files directly inside the output directory, in name order, and moves
//! each consecutive batch of `per_folder` files into `group0`, `group1`, ...
//! Not safe to run concurrently on the same directory.

use std::fs;
use std::path::{Path, PathBuf};

use super::is_schedule_file;
use crate::error::{Error, Result};

/// Name of the folder holding batch `batch`
pub fn folder_name(batch: usize) -> String {
    format!("group{batch}")
}

/// Move schedule files of `dir` into folders of `per_folder` files each
///
/// Returns the number of folders used. Existing folders are reused.
pub fn group_into_folders(dir: &Path, per_folder: usize) -> Result<usize> {
    if per_folder == 0 {
        return Err(Error::config("schedules per folder must be at least 1"));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| Error::with_source(format!("Failed to list {}", dir.display()), e))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_schedule_file(path))
        .collect();
    files.sort();

    let folders = files.len().div_ceil(per_folder);
    for batch in 0..folders {
        fs::create_dir_all(dir.join(folder_name(batch)))?;
    }

    for (i, file) in files.iter().enumerate() {
        let Some(name) = file.file_name() else { continue };
        let target = dir.join(folder_name(i / per_folder)).join(name);
        fs::rename(file, &target).map_err(|e| {
            Error::with_source(
                format!("Failed to move {} to {}", file.display(), target.display()),
                e,
            )
        })?;
    }

    tracing::info!(
        dir = %dir.display(),
        files = files.len(),
        folders,
        "Grouped schedules into folders"
    );
    Ok(folders)
}
