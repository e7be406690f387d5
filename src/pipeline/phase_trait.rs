use super::context::{MigrationRun, PipelineContext};
use super::error::MigrationError;
use super::state::MigrationState;
use async_trait::async_trait;

#[async_trait]
pub trait MigrationPhase: Send + Sync {
    fn state(&self) -> MigrationState;

    async fn execute(
        &self,
        run: &mut MigrationRun,
        context: &PipelineContext,
    ) -> Result<(), MigrationError>;
}
