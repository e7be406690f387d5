//! Workspace file operations requested by the operator

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

pub const VCS_DIR: &str = ".git";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Failed to {operation} {}: {message}", .path.display())]
pub struct FileOperationError {
    pub operation: &'static str,
    pub path: PathBuf,
    pub message: String,
}

impl FileOperationError {
    pub fn new(operation: &'static str, path: &Path, err: impl ToString) -> Self {
        Self {
            operation,
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

fn is_vcs_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name() == VCS_DIR
}

/// Delete every file called `file_name` anywhere below the workspace root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDeletion {
    pub file_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletionReport {
    pub removed: Vec<PathBuf>,
    pub failures: Vec<FileOperationError>,
}

impl FileDeletion {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Removes all matches under `root`. A name with no match is a no-op.
    /// Failures are collected per file; the walk continues past them.
    pub fn apply(&self, root: &Path) -> DeletionReport {
        let mut report = DeletionReport::default();
        let mut matches = Vec::new();

        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_vcs_dir(e))
        {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && entry.file_name() == self.file_name.as_str()
                    {
                        matches.push(entry.into_path());
                    }
                }
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    warn!(path = %path.display(), "Skipping unreadable entry: {}", e);
                    report
                        .failures
                        .push(FileOperationError::new("walk", &path, e));
                }
            }
        }

        for path in matches {
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    debug!(path = %path.display(), "Deleted file");
                    report.removed.push(path);
                }
                Err(e) => {
                    warn!(path = %path.display(), "Failed to delete: {}", e);
                    report
                        .failures
                        .push(FileOperationError::new("delete", &path, e));
                }
            }
        }

        report
    }
}

/// Locate a directory by name for property-file conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRequest {
    pub folder_name: String,
}

impl ConversionRequest {
    pub fn new(folder_name: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
        }
    }

    /// The shallowest directory below `root` named `folder_name`. Ties go to
    /// the lexicographically smallest path.
    pub fn resolve(&self, root: &Path) -> Option<PathBuf> {
        WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_vcs_dir(e))
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_dir() && e.file_name() == self.folder_name.as_str())
            .min_by(|a, b| {
                a.depth()
                    .cmp(&b.depth())
                    .then_with(|| a.path().cmp(b.path()))
            })
            .map(DirEntry::into_path)
    }
}
