pub mod config;
pub mod context;
pub mod error;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use config::PipelineConfig;
pub use context::{MigrationRun, PipelineContext};
pub use error::MigrationError;
pub use orchestrator::{MigrationOrchestrator, MigrationOutcome};
pub use phase_trait::MigrationPhase;
pub use state::MigrationState;
