use crate::pipeline::context::{MigrationRun, PipelineContext};
use crate::pipeline::error::MigrationError;
use crate::pipeline::phase_trait::MigrationPhase;
use crate::pipeline::state::MigrationState;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// Converts the requested property folder, when one was asked for and exists
pub struct ConvertPhase;

#[async_trait]
impl MigrationPhase for ConvertPhase {
    fn state(&self) -> MigrationState {
        MigrationState::Convert
    }

    async fn execute(
        &self,
        run: &mut MigrationRun,
        context: &PipelineContext,
    ) -> Result<(), MigrationError> {
        let Some(request) = run.plan.conversion.clone() else {
            debug!("No conversion requested");
            return Ok(());
        };

        match request.resolve(&run.workspace) {
            Some(folder) => {
                let artifact = context.converter.convert(&folder)?;
                info!(
                    folder = %folder.display(),
                    artifact = %artifact.display(),
                    "Conversion complete"
                );
                run.converted = Some(artifact);
            }
            None => {
                warn!(folder = %request.folder_name, "Conversion folder not found");
                run.warn(format!(
                    "Folder {} not found in workspace, nothing converted",
                    request.folder_name
                ));
            }
        }
        Ok(())
    }
}
