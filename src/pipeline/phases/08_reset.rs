use crate::pipeline::context::{MigrationRun, PipelineContext};
use crate::pipeline::error::MigrationError;
use crate::pipeline::phase_trait::MigrationPhase;
use crate::pipeline::state::MigrationState;
use crate::plan::{FileOperationError, VCS_DIR};
use async_trait::async_trait;
use tracing::{info, warn};

/// Empties the workspace, keeping only its `.git` directory
pub struct ResetPhase;

#[async_trait]
impl MigrationPhase for ResetPhase {
    fn state(&self) -> MigrationState {
        MigrationState::Reset
    }

    async fn execute(
        &self,
        run: &mut MigrationRun,
        _context: &PipelineContext,
    ) -> Result<(), MigrationError> {
        let entries = std::fs::read_dir(&run.workspace)
            .map_err(|e| FileOperationError::new("read", &run.workspace, e))?;

        let mut removed = 0usize;
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    let failure = FileOperationError::new("read", &run.workspace, e);
                    run.warn(failure.to_string());
                    continue;
                }
            };
            if path.file_name().is_some_and(|name| name == VCS_DIR) {
                continue;
            }

            let result = if path.is_dir() {
                std::fs::remove_dir_all(&path)
            } else {
                std::fs::remove_file(&path)
            };
            match result {
                Ok(()) => removed += 1,
                Err(e) => {
                    let failure = FileOperationError::new("remove", &path, e);
                    warn!(error = %failure, "Workspace reset incomplete");
                    run.warn(failure.to_string());
                }
            }
        }

        info!(workspace = %run.workspace.display(), removed, "Reset workspace");
        Ok(())
    }
}
