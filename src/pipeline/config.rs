use crate::config::SpringshiftConfig;
use std::path::PathBuf;

const DEFAULT_ACTIVE_RECIPE: &str = "com.springshift.migration";
const DEFAULT_REPORT_FILE: &str = "springshift_changes.md";
const DEFAULT_BRANCH_PREFIX: &str = "springshift";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Name given to the composed recipe document
    pub active_recipe: String,
    /// Where engine logs are moved after a run
    pub log_dir: PathBuf,
    pub report_file: String,
    pub branch_prefix: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            active_recipe: DEFAULT_ACTIVE_RECIPE.to_string(),
            log_dir: PathBuf::from("."),
            report_file: DEFAULT_REPORT_FILE.to_string(),
            branch_prefix: DEFAULT_BRANCH_PREFIX.to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SpringshiftConfig) -> Self {
        Self {
            active_recipe: config.active_recipe.clone(),
            log_dir: config.log_dir.clone(),
            report_file: config.report_file.clone(),
            branch_prefix: config.branch_prefix.clone(),
        }
    }

    pub fn with_active_recipe(mut self, active_recipe: impl Into<String>) -> Self {
        self.active_recipe = active_recipe.into();
        self
    }

    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    pub fn with_report_file(mut self, report_file: impl Into<String>) -> Self {
        self.report_file = report_file.into();
        self
    }

    pub fn with_branch_prefix(mut self, branch_prefix: impl Into<String>) -> Self {
        self.branch_prefix = branch_prefix.into();
        self
    }
}
