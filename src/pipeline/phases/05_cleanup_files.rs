use crate::pipeline::context::{MigrationRun, PipelineContext};
use crate::pipeline::error::MigrationError;
use crate::pipeline::phase_trait::MigrationPhase;
use crate::pipeline::state::MigrationState;
use async_trait::async_trait;
use tracing::{info, warn};

/// Applies the planned file deletions. Per-file failures become warnings.
pub struct CleanupFilesPhase;

#[async_trait]
impl MigrationPhase for CleanupFilesPhase {
    fn state(&self) -> MigrationState {
        MigrationState::CleanupFiles
    }

    async fn execute(
        &self,
        run: &mut MigrationRun,
        _context: &PipelineContext,
    ) -> Result<(), MigrationError> {
        let mut failures = Vec::new();

        for deletion in &run.plan.deletions {
            let report = deletion.apply(&run.workspace);
            info!(
                file = %deletion.file_name,
                removed = report.removed.len(),
                "Applied file deletion"
            );
            failures.extend(report.failures);
        }

        for failure in failures {
            warn!(error = %failure, "File deletion failed");
            run.warn(failure.to_string());
        }
        Ok(())
    }
}
