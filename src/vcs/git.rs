//! `git` command-line adapter

use super::{CloneError, PublishError, VcsError, VersionControl};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

pub struct GitCli {
    program: String,
    commit_message: String,
}

impl GitCli {
    pub fn new(commit_message: impl Into<String>) -> Self {
        Self {
            program: "git".to_string(),
            commit_message: commit_message.into(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    async fn output(&self, cwd: Option<&Path>, args: &[&str]) -> Result<std::process::Output, VcsError> {
        let joined = args.join(" ");
        debug!(args = %joined, "Running git");

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }

        command.output().await.map_err(|source| VcsError::Spawn {
            args: joined,
            source,
        })
    }

    async fn run(&self, cwd: Option<&Path>, args: &[&str]) -> Result<(), VcsError> {
        let output = self.output(cwd, args).await?;
        if output.status.success() {
            Ok(())
        } else {
            Err(VcsError::Failed {
                args: args.join(" "),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    async fn branch_exists(&self, workdir: &Path, branch: &str) -> Result<bool, VcsError> {
        let reference = format!("refs/heads/{}", branch);
        let output = self
            .output(
                Some(workdir),
                &["rev-parse", "--verify", "--quiet", &reference],
            )
            .await?;
        Ok(output.status.success())
    }

    async fn publish(
        &self,
        workdir: &Path,
        source_branch: &str,
        target_branch: &str,
    ) -> Result<(), VcsError> {
        if self.branch_exists(workdir, target_branch).await? {
            debug!(branch = target_branch, "Target branch exists, switching");
            self.run(Some(workdir), &["checkout", target_branch]).await?;
        } else {
            self.run(Some(workdir), &["checkout", source_branch]).await?;
            self.run(Some(workdir), &["checkout", "-b", target_branch])
                .await?;
        }

        self.run(Some(workdir), &["add", "--all"]).await?;
        self.run(
            Some(workdir),
            &["commit", "--allow-empty", "-m", &self.commit_message],
        )
        .await?;
        self.run(
            Some(workdir),
            &["push", "--set-upstream", "origin", target_branch],
        )
        .await
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("Apply springshift migration")
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn clone_repo(&self, url: &str, branch: &str, dest: &Path) -> Result<PathBuf, CloneError> {
        let dest_str = dest.to_string_lossy();
        info!(url, branch, dest = %dest.display(), "Cloning repository");

        self.run(None, &["clone", "--branch", branch, url, &dest_str])
            .await
            .map_err(|source| CloneError {
                url: url.to_string(),
                branch: branch.to_string(),
                source,
            })?;

        Ok(dest.to_path_buf())
    }

    async fn commit_and_push(
        &self,
        workdir: &Path,
        source_branch: &str,
        target_branch: &str,
    ) -> Result<(), PublishError> {
        self.publish(workdir, source_branch, target_branch)
            .await
            .map_err(|source| PublishError {
                target_branch: target_branch.to_string(),
                source,
            })?;
        info!(branch = target_branch, "Changes pushed");
        Ok(())
    }
}
