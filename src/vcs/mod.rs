//! Version control collaborator
//!
//! Only two operations are needed: cloning the service into a fresh workspace
//! and publishing the migrated tree to a new branch. [`GitCli`] shells out to
//! `git`; tests substitute their own [`VersionControl`] implementation.

pub mod git;

pub use git::GitCli;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Prefix of timestamp-qualified workspace directories
pub const WORKSPACE_PREFIX: &str = "data";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("Failed to run git {args}: {source}")]
    Spawn {
        args: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {args} exited with {status}: {stderr}")]
    Failed {
        args: String,
        status: String,
        stderr: String,
    },
}

#[derive(Debug, Error)]
#[error("Failed to clone {url} ({branch}): {source}")]
pub struct CloneError {
    pub url: String,
    pub branch: String,
    #[source]
    pub source: VcsError,
}

#[derive(Debug, Error)]
#[error("Failed to publish branch {target_branch}: {source}")]
pub struct PublishError {
    pub target_branch: String,
    #[source]
    pub source: VcsError,
}

#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Clones `branch` of `url` into `dest` and returns the working directory
    async fn clone_repo(&self, url: &str, branch: &str, dest: &Path) -> Result<PathBuf, CloneError>;

    /// Stages everything, commits, and pushes to `target_branch`.
    ///
    /// `target_branch` is created from `source_branch` when it does not exist
    /// yet; an existing branch is checked out instead.
    async fn commit_and_push(
        &self,
        workdir: &Path,
        source_branch: &str,
        target_branch: &str,
    ) -> Result<(), PublishError>;
}

/// Whether `path` is the root of a git working tree
pub fn is_work_tree(path: &Path) -> bool {
    path.is_dir() && path.join(".git").exists()
}

/// `<prefix>_<timestamp>`, used for both branches and workspace directories
pub fn timestamped(prefix: &str, at: DateTime<Local>) -> String {
    format!("{}_{}", prefix, at.format(TIMESTAMP_FORMAT))
}
