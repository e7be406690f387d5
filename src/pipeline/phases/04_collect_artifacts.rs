use crate::engine::ENGINE_LOG_FILE;
use crate::pipeline::context::{MigrationRun, PipelineContext};
use crate::pipeline::error::MigrationError;
use crate::pipeline::phase_trait::MigrationPhase;
use crate::pipeline::state::MigrationState;
use crate::plan::FileOperationError;
use crate::report::ChangeReport;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Moves the engine log out of the workspace and writes the change report into it
pub struct CollectArtifactsPhase;

fn move_file(from: &Path, dir: &Path, file_name: &str) -> Result<PathBuf, FileOperationError> {
    std::fs::create_dir_all(dir).map_err(|e| FileOperationError::new("create", dir, e))?;
    let dest = dir.join(file_name);

    // rename fails across filesystems
    if std::fs::rename(from, &dest).is_err() {
        std::fs::copy(from, &dest).map_err(|e| FileOperationError::new("copy", from, e))?;
        std::fs::remove_file(from).map_err(|e| FileOperationError::new("remove", from, e))?;
    }
    Ok(dest)
}

#[async_trait]
impl MigrationPhase for CollectArtifactsPhase {
    fn state(&self) -> MigrationState {
        MigrationState::CollectArtifacts
    }

    async fn execute(
        &self,
        run: &mut MigrationRun,
        context: &PipelineContext,
    ) -> Result<(), MigrationError> {
        let mut failures = Vec::new();

        let log = run
            .log_path
            .clone()
            .unwrap_or_else(|| run.workspace.join(ENGINE_LOG_FILE));
        if log.is_file() {
            match move_file(&log, &context.config.log_dir, &run.log_file_name()) {
                Ok(dest) => {
                    info!(path = %dest.display(), "Collected engine log");
                    run.log_path = Some(dest);
                }
                Err(e) => failures.push(e),
            }
        } else {
            warn!(path = %log.display(), "No engine log to collect");
        }

        let report = ChangeReport::new(&run.features, &run.plan.narrative)
            .write_to(&run.workspace, &context.config.report_file);
        match report {
            Ok(path) => {
                info!(path = %path.display(), "Wrote change report");
                run.report_path = Some(path);
            }
            Err(e) => failures.push(e),
        }

        let mut failures = failures.into_iter();
        match failures.next() {
            None => Ok(()),
            Some(first) => {
                for other in failures {
                    run.warn(other.to_string());
                }
                Err(first.into())
            }
        }
    }
}
