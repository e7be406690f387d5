//! Shared helpers for integration tests: fixture paths, throwaway git
//! workspaces and in-memory collaborators.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use springshift::convert::{ConfigMapConverter, ConvertError, PropertyConverter};
use springshift::engine::{EngineRun, RewriteEngine, ToolInvocationError};
use springshift::recipe::{FragmentStore, RecipeComposer};
use springshift::vcs::{CloneError, PublishError, VcsError, VersionControl};
use springshift::{PipelineConfig, PipelineContext};
use tempfile::TempDir;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

pub fn manifest_fixture(name: &str) -> PathBuf {
    fixture_path("manifests").join(name).join("pom.xml")
}

/// A temp dir with `ws/.git` and, when given, a copy of a manifest fixture
pub fn git_workspace(manifest: Option<&str>) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let ws = dir.path().join("data_2024-03-09_14-05-07");
    std::fs::create_dir_all(ws.join(".git")).expect("Failed to create .git");
    std::fs::write(ws.join(".git/HEAD"), "ref: refs/heads/main\n").expect("Failed to write HEAD");
    if let Some(name) = manifest {
        std::fs::copy(manifest_fixture(name), ws.join("pom.xml")).expect("Failed to copy pom.xml");
    }
    (dir, ws)
}

pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(&path, content).expect("Failed to write file");
    path
}

/// Engine stand-in that records where it ran and what `rewrite.yml` said
pub struct ScriptedEngine {
    pub exit_code: i32,
    pub seen_config: Mutex<Option<String>>,
}

impl ScriptedEngine {
    pub fn exiting(exit_code: i32) -> Self {
        Self {
            exit_code,
            seen_config: Mutex::new(None),
        }
    }
}

#[async_trait]
impl RewriteEngine for ScriptedEngine {
    async fn run(&self, workdir: &Path, log_path: &Path) -> Result<EngineRun, ToolInvocationError> {
        let config = std::fs::read_to_string(workdir.join("rewrite.yml")).ok();
        *self.seen_config.lock().unwrap() = config;

        std::fs::write(log_path, "[INFO] Running recipe(s)...\n").map_err(|source| {
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
                program: "mvn".to_string(),
                status: format!("exit status: {}", self.exit_code),
                exit_code: Some(self.exit_code),
                log_path: log_path.to_path_buf(),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Push {
    pub workdir: PathBuf,
    pub source_branch: String,
    pub target_branch: String,
    /// Files present in the workspace at push time, relative, sorted
    pub files: Vec<String>,
}

/// Records pushes instead of talking to a remote
#[derive(Default)]
pub struct RecordingVcs {
    pub reject_push: bool,
    pub pushes: Mutex<Vec<Push>>,
}

fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            e.path()
                .strip_prefix(root)
                .ok()
                .map(|p| p.to_string_lossy().replace('\\', "/"))
        })
        .collect();
    files.sort();
    files
}

#[async_trait]
impl VersionControl for RecordingVcs {
    async fn clone_repo(&self, url: &str, branch: &str, dest: &Path) -> Result<PathBuf, CloneError> {
        std::fs::create_dir_all(dest.join(".git")).map_err(|source| CloneError {
            url: url.to_string(),
            branch: branch.to_string(),
            source: VcsError::Spawn {
                args: format!("clone {}", url),
                source,
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
        if self.reject_push {
            return Err(PublishError {
                target_branch: target_branch.to_string(),
                source: VcsError::Failed {
                    args: format!("push --set-upstream origin {}", target_branch),
                    status: "exit status: 1".to_string(),
                    stderr: "! [remote rejected] (permission denied)".to_string(),
                },
            });
        }
        self.pushes.lock().unwrap().push(Push {
            workdir: workdir.to_path_buf(),
            source_branch: source_branch.to_string(),
            target_branch: target_branch.to_string(),
            files: list_files(workdir),
        });
        Ok(())
    }
}

/// Converter that always fails, for checking that conversion is non-fatal
pub struct FailingConverter;

impl PropertyConverter for FailingConverter {
    fn convert(&self, folder: &Path) -> Result<PathBuf, ConvertError> {
        Err(ConvertError::NoPropertyFiles(folder.to_path_buf()))
    }
}

pub struct Harness {
    pub engine: Arc<ScriptedEngine>,
    pub vcs: Arc<RecordingVcs>,
    pub log_dir: TempDir,
}

impl Harness {
    pub fn new(engine_exit: i32) -> Self {
        Self {
            engine: Arc::new(ScriptedEngine::exiting(engine_exit)),
            vcs: Arc::new(RecordingVcs::default()),
            log_dir: TempDir::new().expect("Failed to create log dir"),
        }
    }

    pub fn rejecting_pushes(mut self) -> Self {
        self.vcs = Arc::new(RecordingVcs {
            reject_push: true,
            ..Default::default()
        });
        self
    }

    pub fn context(&self) -> PipelineContext {
        self.context_with_converter(Arc::new(ConfigMapConverter::default()))
    }

    pub fn context_with_converter(&self, converter: Arc<dyn PropertyConverter>) -> PipelineContext {
        PipelineContext::new(
            RecipeComposer::new(FragmentStore::Embedded),
            self.engine.clone(),
            self.vcs.clone(),
            converter,
            PipelineConfig::new().with_log_dir(self.log_dir.path()),
        )
    }
}
