use crate::pipeline::context::{MigrationRun, PipelineContext};
use crate::pipeline::error::MigrationError;
use crate::pipeline::phase_trait::MigrationPhase;
use crate::pipeline::state::MigrationState;
use async_trait::async_trait;
use tracing::info;

/// Folds the planned fragments into one document named after the active recipe
pub struct ComposePhase;

#[async_trait]
impl MigrationPhase for ComposePhase {
    fn state(&self) -> MigrationState {
        MigrationState::Compose
    }

    async fn execute(
        &self,
        run: &mut MigrationRun,
        context: &PipelineContext,
    ) -> Result<(), MigrationError> {
        let document = context
            .composer
            .compose(&run.plan.fragments)?
            .with_name(&context.config.active_recipe);

        info!(
            fragments = run.plan.fragments.len(),
            recipes = document.recipe_names().len(),
            "Composed recipe document"
        );
        run.document = Some(document);
        Ok(())
    }
}
