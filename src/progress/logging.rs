//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, error, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { workspace } => {
                info!(workspace = %workspace, "Starting migration");
            }
            ProgressEvent::StateStarted { state } => {
                info!(state = %state, "Entering state");
            }
            ProgressEvent::StateComplete { state, duration } => {
                debug!(
                    state = %state,
                    duration_ms = duration.as_millis(),
                    "State complete"
                );
            }
            ProgressEvent::StateFailed {
                state,
                error,
                fatal,
            } => {
                if *fatal {
                    error!(state = %state, error = %error, "State failed, aborting");
                } else {
                    warn!(state = %state, error = %error, "State failed, continuing");
                }
            }
            ProgressEvent::Completed { branch, total_time } => {
                info!(
                    branch = %branch,
                    total_time_ms = total_time.as_millis(),
                    "Migration complete"
                );
            }
            ProgressEvent::Failed { error } => {
                warn!(error = %error, "Migration failed");
            }
        }
    }
}
