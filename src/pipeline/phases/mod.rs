// Migration states, one file per state in execution order.
//
// Each phase mutates the `MigrationRun` it is handed; the orchestrator decides
// from `MigrationState::is_fatal` whether a failure ends the run.

#[path = "01_compose.rs"]
pub mod compose;
#[path = "02_write_config.rs"]
pub mod write_config;
#[path = "03_run_engine.rs"]
pub mod run_engine;
#[path = "04_collect_artifacts.rs"]
pub mod collect_artifacts;
#[path = "05_cleanup_files.rs"]
pub mod cleanup_files;
#[path = "06_convert.rs"]
pub mod convert;
#[path = "07_publish.rs"]
pub mod publish;
#[path = "08_reset.rs"]
pub mod reset;

pub use cleanup_files::CleanupFilesPhase;
pub use collect_artifacts::CollectArtifactsPhase;
pub use compose::ComposePhase;
pub use convert::ConvertPhase;
pub use publish::PublishPhase;
pub use reset::ResetPhase;
pub use run_engine::RunEnginePhase;
pub use write_config::WriteConfigPhase;

use super::phase_trait::MigrationPhase;
use super::state::MigrationState;

pub fn phase_for(state: MigrationState) -> Box<dyn MigrationPhase> {
    match state {
        MigrationState::Compose => Box::new(ComposePhase),
        MigrationState::WriteConfig => Box::new(WriteConfigPhase),
        MigrationState::RunEngine => Box::new(RunEnginePhase),
        MigrationState::CollectArtifacts => Box::new(CollectArtifactsPhase),
        MigrationState::CleanupFiles => Box::new(CleanupFilesPhase),
        MigrationState::Convert => Box::new(ConvertPhase),
        MigrationState::Publish => Box::new(PublishPhase),
        MigrationState::Reset => Box::new(ResetPhase),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_for_matches_state() {
        for state in MigrationState::sequence() {
            assert_eq!(phase_for(state).state(), state);
        }
    }
}
