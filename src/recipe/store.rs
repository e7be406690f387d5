//! Where fragment documents come from

use super::{CompositionError, FragmentId, RecipeDocument};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentStore {
    /// Fragments compiled into the binary
    Embedded,
    /// A directory containing the fragment files by their file names
    Directory(PathBuf),
}

impl FragmentStore {
    pub fn from_dir(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => Self::Directory(dir.to_path_buf()),
            None => Self::Embedded,
        }
    }

    pub fn load(&self, id: FragmentId) -> Result<RecipeDocument, CompositionError> {
        match self {
            Self::Embedded => RecipeDocument::parse(id.embedded_source(), id.file_name()),
            Self::Directory(dir) => {
                let path = dir.join(id.file_name());
                debug!(fragment = %id, path = %path.display(), "Loading fragment");
                let source = std::fs::read_to_string(&path).map_err(|e| {
                    CompositionError::FragmentUnavailable {
                        fragment: id,
                        message: format!("{}: {}", path.display(), e),
                    }
                })?;
                RecipeDocument::parse(&source, id.file_name())
            }
        }
    }
}

impl Default for FragmentStore {
    fn default() -> Self {
        Self::Embedded
    }
}
