//! Progress handler trait and events

use crate::pipeline::MigrationState;
use std::time::Duration;

/// Events emitted while a migration runs
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Orchestration started for a workspace
    Started { workspace: String },

    StateStarted { state: MigrationState },

    StateComplete {
        state: MigrationState,
        duration: Duration,
    },

    /// A state failed; `fatal` failures end the run
    StateFailed {
        state: MigrationState,
        error: String,
        fatal: bool,
    },

    /// All states ran; changes were published to `branch`
    Completed { branch: String, total_time: Duration },

    Failed { error: String },
}

pub trait ProgressHandler: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
}

/// Handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
