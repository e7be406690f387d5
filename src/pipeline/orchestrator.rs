use super::context::{MigrationRun, PipelineContext};
use super::error::MigrationError;
use super::phases::phase_for;
use super::state::MigrationState;
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use crate::vcs::is_work_tree;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of a migration that reached the end of the state table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationOutcome {
    pub branch: String,
    pub warnings: Vec<String>,
    pub log_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub engine_exit: Option<i32>,
}

/// Absolute form of `path` with symlinks resolved as far as the path exists
fn resolve_path(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut missing = Vec::new();
    let mut existing = absolute.clone();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return missing
                .into_iter()
                .rev()
                .fold(canonical, |acc: PathBuf, part| acc.join(part));
        }
        let Some(name) = existing.file_name().map(|name| name.to_os_string()) else {
            return absolute;
        };
        if !existing.pop() {
            return absolute;
        }
        missing.push(name);
    }
}

pub struct MigrationOrchestrator {
    context: PipelineContext,
    progress_handler: Arc<dyn ProgressHandler>,
}

impl MigrationOrchestrator {
    pub fn new(context: PipelineContext) -> Self {
        Self {
            context,
            progress_handler: Arc::new(NoOpHandler),
        }
    }

    pub fn with_progress(mut self, handler: Arc<dyn ProgressHandler>) -> Self {
        self.progress_handler = handler;
        self
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    fn check_workspace(&self, run: &MigrationRun) -> Result<(), MigrationError> {
        if !run.workspace.is_dir() {
            return Err(MigrationError::WorkspaceMissing(run.workspace.clone()));
        }
        if !is_work_tree(&run.workspace) {
            return Err(MigrationError::NotAWorkTree(run.workspace.clone()));
        }

        // Reset empties the workspace, so the collected log must live outside it
        let workspace = resolve_path(&run.workspace);
        let log_dir = resolve_path(&self.context.config.log_dir);
        if log_dir.starts_with(&workspace) {
            return Err(MigrationError::LogDirInWorkspace { log_dir, workspace });
        }
        Ok(())
    }

    /// Walks the state table from [`MigrationState::INITIAL`].
    ///
    /// A failure in a fatal state returns [`MigrationError::Aborted`] and leaves
    /// the workspace as it was at that point. Any other failure is recorded as
    /// a warning on the run and the next state runs.
    pub async fn execute(&self, run: &mut MigrationRun) -> Result<MigrationOutcome, MigrationError> {
        let start = Instant::now();
        info!(
            "Starting migration for: {}",
            run.workspace.display()
        );

        if let Err(err) = self.check_workspace(run) {
            self.progress_handler.on_progress(&ProgressEvent::Failed {
                error: err.to_string(),
            });
            return Err(err);
        }

        self.progress_handler.on_progress(&ProgressEvent::Started {
            workspace: run.workspace.display().to_string(),
        });

        let mut state = Some(MigrationState::INITIAL);
        while let Some(current) = state {
            self.progress_handler
                .on_progress(&ProgressEvent::StateStarted { state: current });

            let state_start = Instant::now();
            match phase_for(current).execute(run, &self.context).await {
                Ok(()) => {
                    self.progress_handler.on_progress(&ProgressEvent::StateComplete {
                        state: current,
                        duration: state_start.elapsed(),
                    });
                    debug!("State {} complete", current);
                }
                Err(err) if current.is_fatal() => {
                    self.progress_handler.on_progress(&ProgressEvent::StateFailed {
                        state: current,
                        error: err.to_string(),
                        fatal: true,
                    });
                    let err = MigrationError::Aborted {
                        state: current,
                        source: Box::new(err),
                    };
                    self.progress_handler.on_progress(&ProgressEvent::Failed {
                        error: err.to_string(),
                    });
                    return Err(err);
                }
                Err(err) => {
                    self.progress_handler.on_progress(&ProgressEvent::StateFailed {
                        state: current,
                        error: err.to_string(),
                        fatal: false,
                    });
                    warn!("State {} failed: {}", current, err);
                    run.warn(format!("{}: {}", current, err));
                }
            }

            state = current.next();
        }

        // Publish is fatal, so reaching here means a branch was pushed
        let branch = run.branch.clone().unwrap_or_default();
        info!(
            "Migration complete: branch {} with {} warning(s)",
            branch,
            run.warnings.len()
        );
        self.progress_handler.on_progress(&ProgressEvent::Completed {
            branch: branch.clone(),
            total_time: start.elapsed(),
        });

        Ok(MigrationOutcome {
            branch,
            warnings: run.warnings.clone(),
            log_path: run.log_path.clone(),
            report_path: run.report_path.clone(),
            engine_exit: run.engine_exit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::{self, FakeVcs};
    use crate::plan::MigrationChoice;
    use crate::recipe::{FragmentStore, RecipeComposer};
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<String>>,
    }

    impl ProgressHandler for RecordingHandler {
        fn on_progress(&self, event: &ProgressEvent) {
            let label = match event {
                ProgressEvent::Started { .. } => "started".to_string(),
                ProgressEvent::StateStarted { state } => format!("enter {}", state),
                ProgressEvent::StateComplete { state, .. } => format!("done {}", state),
                ProgressEvent::StateFailed { state, fatal, .. } => {
                    format!("fail {} fatal={}", state, fatal)
                }
                ProgressEvent::Completed { .. } => "completed".to_string(),
                ProgressEvent::Failed { .. } => "failed".to_string(),
            };
            self.events.lock().unwrap().push(label);
        }
    }

    #[tokio::test]
    async fn test_full_run_emits_every_state() {
        let (_dir, ws) = testing::workspace();
        let logs = TempDir::new().unwrap();
        let handler = Arc::new(RecordingHandler::default());
        let orchestrator =
            MigrationOrchestrator::new(testing::context(logs.path(), 0, Arc::default()))
                .with_progress(handler.clone());
        let mut run = testing::run(&ws, MigrationChoice::default());

        let outcome = orchestrator.execute(&mut run).await.unwrap();

        assert!(outcome.branch.starts_with("springshift_"));
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.engine_exit, Some(0));

        let events = handler.events.lock().unwrap();
        assert_eq!(events.first().map(String::as_str), Some("started"));
        assert_eq!(events.last().map(String::as_str), Some("completed"));
        let entered: Vec<_> = events.iter().filter(|e| e.starts_with("enter")).collect();
        assert_eq!(entered.len(), MigrationState::sequence().count());
    }

    #[tokio::test]
    async fn test_engine_failure_is_warning() {
        let (_dir, ws) = testing::workspace();
        let logs = TempDir::new().unwrap();
        let vcs = Arc::new(FakeVcs::default());
        let orchestrator =
            MigrationOrchestrator::new(testing::context(logs.path(), 2, vcs.clone()));
        let mut run = testing::run(&ws, MigrationChoice::default());

        let outcome = orchestrator.execute(&mut run).await.unwrap();

        assert_eq!(outcome.engine_exit, Some(2));
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].starts_with("run-engine:"));
        assert_eq!(vcs.pushes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_publish_failure_aborts_before_reset() {
        let (_dir, ws) = testing::workspace();
        let logs = TempDir::new().unwrap();
        let vcs = Arc::new(FakeVcs {
            reject: true,
            ..Default::default()
        });
        let orchestrator = MigrationOrchestrator::new(testing::context(logs.path(), 0, vcs));
        let mut run = testing::run(&ws, MigrationChoice::default());

        let err = orchestrator.execute(&mut run).await.unwrap_err();

        assert_eq!(err.aborted_state(), Some(MigrationState::Publish));
        assert!(ws.join("pom.xml").exists());
        assert!(ws.join("rewrite.yml").exists());
    }

    #[tokio::test]
    async fn test_rejects_non_work_tree() {
        let dir = TempDir::new().unwrap();
        let orchestrator =
            MigrationOrchestrator::new(testing::context(dir.path(), 0, Arc::default()));
        let mut run = testing::run(dir.path(), MigrationChoice::default());

        let err = orchestrator.execute(&mut run).await.unwrap_err();
        assert!(matches!(err, MigrationError::NotAWorkTree(_)));
        assert!(!dir.path().join("rewrite.yml").exists());
    }

    #[tokio::test]
    async fn test_rejects_log_dir_inside_workspace() {
        for log_dir in ["", "logs/nested"] {
            let (_dir, ws) = testing::workspace();
            let vcs = Arc::new(FakeVcs::default());
            let orchestrator =
                MigrationOrchestrator::new(testing::context(&ws.join(log_dir), 0, vcs.clone()));
            let mut run = testing::run(&ws, MigrationChoice::default());

            let err = orchestrator.execute(&mut run).await.unwrap_err();

            assert!(matches!(err, MigrationError::LogDirInWorkspace { .. }));
            assert!(!ws.join("rewrite.yml").exists());
            assert!(ws.join("pom.xml").exists());
            assert!(vcs.pushes.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_log_dir_beside_workspace_is_accepted() {
        let (dir, ws) = testing::workspace();
        let orchestrator = MigrationOrchestrator::new(testing::context(
            &dir.path().join("logs"),
            0,
            Arc::default(),
        ));
        let mut run = testing::run(&ws, MigrationChoice::default());

        let outcome = orchestrator.execute(&mut run).await.unwrap();
        let log = outcome.log_path.unwrap();
        assert!(log.starts_with(dir.path().join("logs")));
        assert!(log.is_file());
    }

    #[tokio::test]
    async fn test_compose_failure_aborts_before_engine() {
        let (_dir, ws) = testing::workspace();
        let fragments = TempDir::new().unwrap();
        std::fs::write(
            fragments.path().join("rewrite-manifestCleanup.yml"),
            "recipeList:\n  - m1\n",
        )
        .unwrap();
        let logs = TempDir::new().unwrap();
        let vcs = Arc::new(FakeVcs::default());
        let mut context = testing::context(logs.path(), 0, vcs.clone());
        context.composer =
            RecipeComposer::new(FragmentStore::Directory(fragments.path().to_path_buf()));
        let orchestrator = MigrationOrchestrator::new(context);
        let mut run = testing::run(&ws, MigrationChoice::default());

        let err = orchestrator.execute(&mut run).await.unwrap_err();

        assert_eq!(err.aborted_state(), Some(MigrationState::Compose));
        assert!(!ws.join("rewrite.yml").exists());
        assert!(!ws.join("execution.log").exists());
        assert!(run.engine_exit.is_none());
        assert!(vcs.pushes.lock().unwrap().is_empty());
        assert!(ws.join("pom.xml").exists());
    }

    #[tokio::test]
    async fn test_write_config_failure_aborts_before_engine() {
        let (_dir, ws) = testing::workspace();
        std::fs::create_dir_all(ws.join("rewrite.yml")).unwrap();
        let logs = TempDir::new().unwrap();
        let vcs = Arc::new(FakeVcs::default());
        let orchestrator = MigrationOrchestrator::new(testing::context(logs.path(), 0, vcs.clone()));
        let mut run = testing::run(&ws, MigrationChoice::default());

        let err = orchestrator.execute(&mut run).await.unwrap_err();

        assert_eq!(err.aborted_state(), Some(MigrationState::WriteConfig));
        assert!(run.engine_exit.is_none());
        assert!(!ws.join("execution.log").exists());
        assert!(vcs.pushes.lock().unwrap().is_empty());
        assert!(ws.join("pom.xml").exists());
    }

    #[test]
    fn test_resolve_path_keeps_missing_tail() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_path(&dir.path().join("a/b"));
        assert_eq!(resolved, dir.path().canonicalize().unwrap().join("a/b"));
    }

    #[tokio::test]
    async fn test_rejects_missing_workspace() {
        let dir = TempDir::new().unwrap();
        let orchestrator =
            MigrationOrchestrator::new(testing::context(dir.path(), 0, Arc::default()));
        let mut run = testing::run(&dir.path().join("absent"), MigrationChoice::default());

        let err = orchestrator.execute(&mut run).await.unwrap_err();
        assert!(matches!(err, MigrationError::WorkspaceMissing(_)));
    }
}
