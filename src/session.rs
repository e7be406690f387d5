//! Session-scoped analysis state
//!
//! An operator analyzes one workspace, looks at the feature table, then starts
//! a migration from it. [`AnalysisSession`] holds that state between the two
//! steps. Analyzing again replaces it; starting a migration consumes it.

use std::path::{Path, PathBuf};

use chrono::Local;
use thiserror::Error;
use tracing::{info, warn};

use crate::features::{match_features, FeatureCatalog, FeatureStatus};
use crate::manifest::{self, DependencySet, MANIFEST_FILE};
use crate::pipeline::MigrationRun;
use crate::plan::MigrationChoice;
use crate::vcs::{timestamped, CloneError, VersionControl, WORKSPACE_PREFIX};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Nothing has been analyzed in this session")]
    NotAnalyzed,

    #[error(transparent)]
    Clone(#[from] CloneError),

    #[error("Failed to create work root {}: {source}", .path.display())]
    WorkRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of analyzing one workspace
#[derive(Debug, Clone)]
pub struct Analysis {
    pub workspace: PathBuf,
    pub source_branch: String,
    pub dependencies: DependencySet,
    pub features: FeatureStatus,
    /// Manifest problems that did not stop the analysis
    pub warnings: Vec<String>,
}

pub struct AnalysisSession {
    catalog: FeatureCatalog,
    state: Option<Analysis>,
}

impl AnalysisSession {
    pub fn new(catalog: FeatureCatalog) -> Self {
        Self {
            catalog,
            state: None,
        }
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    /// Analyzes the manifest at the root of `workspace`, replacing any previous
    /// analysis. An unreadable or malformed manifest yields an empty feature
    /// table plus a warning rather than an error.
    pub fn analyze(&mut self, workspace: &Path, source_branch: &str) -> &Analysis {
        self.reset();

        let extraction = manifest::extract(&workspace.join(MANIFEST_FILE));
        let succeeded = extraction.succeeded();
        let warnings: Vec<String> = extraction.errors.iter().map(|e| e.to_string()).collect();
        for warning in &warnings {
            warn!(workspace = %workspace.display(), "{}", warning);
        }

        let features = match_features(&extraction.dependencies, &self.catalog, succeeded);
        info!(
            workspace = %workspace.display(),
            dependencies = extraction.dependencies.len(),
            found = features.found_labels().count(),
            "Analyzed workspace"
        );

        self.state.insert(Analysis {
            workspace: workspace.to_path_buf(),
            source_branch: source_branch.to_string(),
            dependencies: extraction.dependencies,
            features,
            warnings,
        })
    }

    /// Clones `branch` of `url` into a fresh `data_<timestamp>` directory under
    /// `work_root` and analyzes it
    pub async fn clone_and_analyze(
        &mut self,
        vcs: &dyn VersionControl,
        url: &str,
        branch: &str,
        work_root: &Path,
    ) -> Result<&Analysis, SessionError> {
        self.reset();

        std::fs::create_dir_all(work_root).map_err(|source| SessionError::WorkRoot {
            path: work_root.to_path_buf(),
            source,
        })?;
        let dest = work_root.join(timestamped(WORKSPACE_PREFIX, Local::now()));
        let workdir = vcs.clone_repo(url, branch, &dest).await?;

        Ok(self.analyze(&workdir, branch))
    }

    pub fn current(&self) -> Option<&Analysis> {
        self.state.as_ref()
    }

    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Takes the current analysis and turns it into a migration run
    pub fn begin_migration(&mut self, choice: MigrationChoice) -> Result<MigrationRun, SessionError> {
        let analysis = self.state.take().ok_or(SessionError::NotAnalyzed)?;
        Ok(MigrationRun::new(
            analysis.workspace,
            analysis.source_branch,
            choice,
            analysis.features,
        ))
    }
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new(FeatureCatalog::builtin())
    }
}
