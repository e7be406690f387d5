//! Migration state transition table

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MigrationState {
    Compose,
    WriteConfig,
    RunEngine,
    CollectArtifacts,
    CleanupFiles,
    Convert,
    Publish,
    Reset,
}

impl MigrationState {
    pub const INITIAL: Self = Self::Compose;

    /// The state that follows `self`, or `None` after the last one
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Compose => Some(Self::WriteConfig),
            Self::WriteConfig => Some(Self::RunEngine),
            Self::RunEngine => Some(Self::CollectArtifacts),
            Self::CollectArtifacts => Some(Self::CleanupFiles),
            Self::CleanupFiles => Some(Self::Convert),
            Self::Convert => Some(Self::Publish),
            Self::Publish => Some(Self::Reset),
            Self::Reset => None,
        }
    }

    /// A failure in a fatal state aborts the run; anything else is a warning
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::Compose | Self::WriteConfig | Self::Publish)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Compose => "compose",
            Self::WriteConfig => "write-config",
            Self::RunEngine => "run-engine",
            Self::CollectArtifacts => "collect-artifacts",
            Self::CleanupFiles => "cleanup-files",
            Self::Convert => "convert",
            Self::Publish => "publish",
            Self::Reset => "reset",
        }
    }

    /// Every state in execution order
    pub fn sequence() -> impl Iterator<Item = Self> {
        std::iter::successors(Some(Self::INITIAL), |state| state.next())
    }
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
