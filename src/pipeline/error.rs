use std::path::PathBuf;

use thiserror::Error;

use crate::convert::ConvertError;
use crate::engine::ToolInvocationError;
use crate::plan::FileOperationError;
use crate::recipe::CompositionError;
use crate::vcs::PublishError;

use super::state::MigrationState;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Workspace {} does not exist", .0.display())]
    WorkspaceMissing(PathBuf),

    #[error("Workspace {} is not a git working tree", .0.display())]
    NotAWorkTree(PathBuf),

    #[error(
        "Log directory {} is inside workspace {}",
        .log_dir.display(),
        .workspace.display()
    )]
    LogDirInWorkspace { log_dir: PathBuf, workspace: PathBuf },

    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error("Failed to write recipe config {}: {source}", .path.display())]
    WriteConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Tool(#[from] ToolInvocationError),

    #[error(transparent)]
    File(#[from] FileOperationError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("Migration aborted in {state}: {source}")]
    Aborted {
        state: MigrationState,
        #[source]
        source: Box<MigrationError>,
    },
}

impl MigrationError {
    /// The state a run was aborted in, if it got that far
    pub fn aborted_state(&self) -> Option<MigrationState> {
        match self {
            Self::Aborted { state, .. } => Some(*state),
            _ => None,
        }
    }
}
