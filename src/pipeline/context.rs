//! Pipeline context and per-run state

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::config::SpringshiftConfig;
use crate::convert::{ConfigMapConverter, PropertyConverter};
use crate::engine::{CommandEngine, RewriteEngine};
use crate::features::FeatureStatus;
use crate::plan::{plan, MigrationChoice, MigrationPlan};
use crate::recipe::{FragmentStore, RecipeComposer, RecipeDocument};
use crate::vcs::{GitCli, VersionControl};

use super::config::PipelineConfig;

/// Context that owns all long-lived pipeline collaborators
pub struct PipelineContext {
    pub composer: RecipeComposer,

    /// External rewrite engine
    pub engine: Arc<dyn RewriteEngine>,

    pub vcs: Arc<dyn VersionControl>,

    /// Property folder converter
    pub converter: Arc<dyn PropertyConverter>,

    pub config: PipelineConfig,
}

impl PipelineContext {
    pub fn new(
        composer: RecipeComposer,
        engine: Arc<dyn RewriteEngine>,
        vcs: Arc<dyn VersionControl>,
        converter: Arc<dyn PropertyConverter>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            composer,
            engine,
            vcs,
            converter,
            config,
        }
    }

    /// Default collaborators: `git`, the configured engine command, and the
    /// ConfigMap converter
    pub fn from_config(config: &SpringshiftConfig) -> Self {
        Self::new(
            RecipeComposer::new(FragmentStore::from_dir(config.fragments_dir.as_deref())),
            Arc::new(CommandEngine::from_config(config)),
            Arc::new(GitCli::new(config.commit_message.clone())),
            Arc::new(ConfigMapConverter::default()),
            PipelineConfig::from_config(config),
        )
    }
}

/// One orchestrator execution against one workspace
#[derive(Debug, Clone)]
pub struct MigrationRun {
    pub workspace: PathBuf,
    /// Branch the workspace was cloned from
    pub source_branch: String,
    pub choice: MigrationChoice,
    pub plan: MigrationPlan,
    /// Snapshot of the analysis, rendered into the change report
    pub features: FeatureStatus,
    pub started_at: DateTime<Local>,

    // Filled in while the states run
    pub document: Option<RecipeDocument>,
    pub config_path: Option<PathBuf>,
    pub engine_exit: Option<i32>,
    pub log_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub converted: Option<PathBuf>,
    pub branch: Option<String>,
    pub warnings: Vec<String>,
}

impl MigrationRun {
    pub fn new(
        workspace: impl Into<PathBuf>,
        source_branch: impl Into<String>,
        choice: MigrationChoice,
        features: FeatureStatus,
    ) -> Self {
        let plan = plan(&choice);
        Self {
            workspace: workspace.into(),
            source_branch: source_branch.into(),
            choice,
            plan,
            features,
            started_at: Local::now(),
            document: None,
            config_path: None,
            engine_exit: None,
            log_path: None,
            report_path: None,
            converted: None,
            branch: None,
            warnings: Vec::new(),
        }
    }

    pub fn with_started_at(mut self, started_at: DateTime<Local>) -> Self {
        self.started_at = started_at;
        self
    }

    /// Records a non-fatal problem on the run
    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// `<workspace-name>-execution.log`
    pub fn log_file_name(&self) -> String {
        let name = self
            .workspace
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "workspace".to_string());
        format!("{}-{}", name, crate::engine::ENGINE_LOG_FILE)
    }
}
