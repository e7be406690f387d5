//! Fake collaborators for pipeline unit tests

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use crate::convert::ConfigMapConverter;
use crate::engine::{EngineRun, RewriteEngine, ToolInvocationError};
use crate::features::FeatureStatus;
use crate::plan::MigrationChoice;
use crate::recipe::{FragmentStore, RecipeComposer};
use crate::vcs::{CloneError, PublishError, VcsError, VersionControl};

use super::config::PipelineConfig;
use super::context::{MigrationRun, PipelineContext};

/// Writes a log line and exits with `exit_code`
pub struct FakeEngine {
    pub exit_code: i32,
}

#[async_trait]
impl RewriteEngine for FakeEngine {
    async fn run(&self, _workdir: &Path, log_path: &Path) -> Result<EngineRun, ToolInvocationError> {
        std::fs::write(log_path, "[INFO] rewrite run\n").map_err(|source| {
            ToolInvocationError::Log {
                path: log_path.to_path_buf(),
                source,
            }
        })?;
        if self.exit_code == 0 {
            Ok(EngineRun {
                log_path: log_path.to_path_buf(),
                exit_code: Some(0),
            })
        } else {
            Err(ToolInvocationError::NonZeroExit {
                program: "fake".to_string(),
                status: format!("exit status: {}", self.exit_code),
                exit_code: Some(self.exit_code),
                log_path: log_path.to_path_buf(),
            })
        }
    }
}

/// Records pushes; fails them when `reject` is set
#[derive(Default)]
pub struct FakeVcs {
    pub reject: bool,
    pub pushes: Mutex<Vec<(PathBuf, String, String)>>,
}

#[async_trait]
impl VersionControl for FakeVcs {
    async fn clone_repo(&self, url: &str, branch: &str, dest: &Path) -> Result<PathBuf, CloneError> {
        std::fs::create_dir_all(dest.join(".git")).map_err(|e| CloneError {
            url: url.to_string(),
            branch: branch.to_string(),
            source: VcsError::Spawn {
                args: "clone".to_string(),
                source: e,
            },
        })?;
        Ok(dest.to_path_buf())
    }

    async fn commit_and_push(
        &self,
        workdir: &Path,
        source_branch: &str,
        target_branch: &str,
    ) -> Result<(), PublishError> {
        if self.reject {
            return Err(PublishError {
                target_branch: target_branch.to_string(),
                source: VcsError::Failed {
                    args: format!("push origin {}", target_branch),
                    status: "exit status: 1".to_string(),
                    stderr: "rejected".to_string(),
                },
            });
        }
        if let Ok(mut pushes) = self.pushes.lock() {
            pushes.push((
                workdir.to_path_buf(),
                source_branch.to_string(),
                target_branch.to_string(),
            ));
        }
        Ok(())
    }
}

pub fn context(log_dir: &Path, engine_exit: i32, vcs: Arc<FakeVcs>) -> PipelineContext {
    PipelineContext::new(
        RecipeComposer::new(FragmentStore::Embedded),
        Arc::new(FakeEngine {
            exit_code: engine_exit,
        }),
        vcs,
        Arc::new(ConfigMapConverter::default()),
        PipelineConfig::new().with_log_dir(log_dir),
    )
}

/// A temp directory holding `ws/.git` and a `pom.xml`
pub fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let ws = dir.path().join("ws");
    std::fs::create_dir_all(ws.join(".git")).unwrap();
    std::fs::write(ws.join("pom.xml"), "<project/>").unwrap();
    (dir, ws)
}

pub fn run(ws: &Path, choice: MigrationChoice) -> MigrationRun {
    MigrationRun::new(ws, "main", choice, FeatureStatus::default())
}
