use crate::pipeline::context::{MigrationRun, PipelineContext};
use crate::pipeline::error::MigrationError;
use crate::pipeline::phase_trait::MigrationPhase;
use crate::pipeline::state::MigrationState;
use crate::vcs::timestamped;
use async_trait::async_trait;
use tracing::info;

/// Commits the workspace and pushes it to `<prefix>_<timestamp>`
pub struct PublishPhase;

#[async_trait]
impl MigrationPhase for PublishPhase {
    fn state(&self) -> MigrationState {
        MigrationState::Publish
    }

    async fn execute(
        &self,
        run: &mut MigrationRun,
        context: &PipelineContext,
    ) -> Result<(), MigrationError> {
        let branch = run
            .branch
            .clone()
            .unwrap_or_else(|| timestamped(&context.config.branch_prefix, run.started_at));
        run.branch = Some(branch.clone());

        context
            .vcs
            .commit_and_push(&run.workspace, &run.source_branch, &branch)
            .await?;

        info!(branch = %branch, "Published migration branch");
        Ok(())
    }
}
