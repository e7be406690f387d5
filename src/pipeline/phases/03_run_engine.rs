use crate::engine::{ToolInvocationError, ENGINE_LOG_FILE};
use crate::pipeline::context::{MigrationRun, PipelineContext};
use crate::pipeline::error::MigrationError;
use crate::pipeline::phase_trait::MigrationPhase;
use crate::pipeline::state::MigrationState;
use async_trait::async_trait;
use tracing::info;

/// Runs the rewrite engine in the workspace and records its exit status
pub struct RunEnginePhase;

#[async_trait]
impl MigrationPhase for RunEnginePhase {
    fn state(&self) -> MigrationState {
        MigrationState::RunEngine
    }

    async fn execute(
        &self,
        run: &mut MigrationRun,
        context: &PipelineContext,
    ) -> Result<(), MigrationError> {
        let log_path = run.workspace.join(ENGINE_LOG_FILE);

        match context.engine.run(&run.workspace, &log_path).await {
            Ok(result) => {
                info!(exit_code = ?result.exit_code, "Rewrite engine finished");
                run.engine_exit = result.exit_code;
                run.log_path = Some(result.log_path);
                Ok(())
            }
            Err(err) => {
                if let ToolInvocationError::NonZeroExit {
                    exit_code,
                    log_path,
                    ..
                } = &err
                {
                    run.engine_exit = *exit_code;
                    run.log_path = Some(log_path.clone());
                }
                Err(err.into())
            }
        }
    }
}
