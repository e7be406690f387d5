//! Configuration management for springshift
//!
//! Settings are loaded from environment variables with sensible defaults.
//!
//! # Environment Variables
//!
//! - `SPRINGSHIFT_WORK_ROOT`: Parent directory for cloned workspaces - default: "."
//! - `SPRINGSHIFT_FRAGMENTS_DIR`: Directory holding recipe fragment files - default: built-in fragments
//! - `SPRINGSHIFT_FEATURE_CATALOG`: YAML feature catalog - default: built-in catalog
//! - `SPRINGSHIFT_ENGINE_PROGRAM`: Rewrite engine executable - default: "mvn"
//! - `SPRINGSHIFT_ENGINE_ARGS`: Whitespace-separated engine arguments; `{active_recipe}` is substituted
//! - `SPRINGSHIFT_ACTIVE_RECIPE`: Recipe name the engine activates - default: "com.springshift.migration"
//! - `SPRINGSHIFT_LOG_DIR`: Where execution logs are collected - default: "."
//! - `SPRINGSHIFT_REPORT_FILE`: Change report filename - default: "springshift_changes.md"
//! - `SPRINGSHIFT_BRANCH_PREFIX`: Prefix of published branches - default: "springshift"
//! - `SPRINGSHIFT_COMMIT_MESSAGE`: Commit message for published changes
//! - `SPRINGSHIFT_LOG_LEVEL`: Logging level - default: "info"

use regex::Regex;
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const ACTIVE_RECIPE_PLACEHOLDER: &str = "{active_recipe}";

const DEFAULT_WORK_ROOT: &str = ".";
const DEFAULT_ENGINE_PROGRAM: &str = "mvn";
const DEFAULT_ENGINE_ARGS: &[&str] = &[
    "-U",
    "org.openrewrite.maven:rewrite-maven-plugin:run",
    "-Drewrite.activeRecipes={active_recipe}",
];
const DEFAULT_ACTIVE_RECIPE: &str = "com.springshift.migration";
const DEFAULT_LOG_DIR: &str = ".";
const DEFAULT_REPORT_FILE: &str = "springshift_changes.md";
const DEFAULT_BRANCH_PREFIX: &str = "springshift";
const DEFAULT_COMMIT_MESSAGE: &str = "Apply springshift migration";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Feature catalog is empty")]
    EmptyCatalog,
}

/// Main configuration structure for springshift
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpringshiftConfig {
    pub work_root: PathBuf,

    /// `None` selects the fragments compiled into the binary
    pub fragments_dir: Option<PathBuf>,

    /// `None` selects the built-in feature catalog
    pub feature_catalog: Option<PathBuf>,

    pub engine_program: String,

    pub engine_args: Vec<String>,

    pub active_recipe: String,

    pub log_dir: PathBuf,

    pub report_file: String,

    pub branch_prefix: String,

    pub commit_message: String,

    pub log_level: String,
}

impl Default for SpringshiftConfig {
    /// Loads from `SPRINGSHIFT_*` environment variables, falling back to defaults
    fn default() -> Self {
        let work_root = env::var("SPRINGSHIFT_WORK_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_WORK_ROOT));

        let fragments_dir = env::var("SPRINGSHIFT_FRAGMENTS_DIR").ok().map(PathBuf::from);
        let feature_catalog = env::var("SPRINGSHIFT_FEATURE_CATALOG")
            .ok()
            .map(PathBuf::from);

        let engine_program = env::var("SPRINGSHIFT_ENGINE_PROGRAM")
            .unwrap_or_else(|_| DEFAULT_ENGINE_PROGRAM.to_string());

        let engine_args = env::var("SPRINGSHIFT_ENGINE_ARGS")
            .ok()
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .unwrap_or_else(|| DEFAULT_ENGINE_ARGS.iter().map(|s| s.to_string()).collect());

        let active_recipe = env::var("SPRINGSHIFT_ACTIVE_RECIPE")
            .unwrap_or_else(|_| DEFAULT_ACTIVE_RECIPE.to_string());

        let log_dir = env::var("SPRINGSHIFT_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_DIR));

        let report_file = env::var("SPRINGSHIFT_REPORT_FILE")
            .unwrap_or_else(|_| DEFAULT_REPORT_FILE.to_string());

        let branch_prefix = env::var("SPRINGSHIFT_BRANCH_PREFIX")
            .unwrap_or_else(|_| DEFAULT_BRANCH_PREFIX.to_string());

        let commit_message = env::var("SPRINGSHIFT_COMMIT_MESSAGE")
            .unwrap_or_else(|_| DEFAULT_COMMIT_MESSAGE.to_string());

        let log_level = env::var("SPRINGSHIFT_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            work_root,
            fragments_dir,
            feature_catalog,
            engine_program,
            engine_args,
            active_recipe,
            log_dir,
            report_file,
            branch_prefix,
            commit_message,
            log_level,
        }
    }
}

impl SpringshiftConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` describing the first invalid setting
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine_program.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Engine program must not be empty".to_string(),
            ));
        }

        if !self
            .engine_args
            .iter()
            .any(|arg| arg.contains(ACTIVE_RECIPE_PLACEHOLDER))
        {
            return Err(ConfigError::ValidationFailed(format!(
                "Engine arguments must reference {}",
                ACTIVE_RECIPE_PLACEHOLDER
            )));
        }

        if self.active_recipe.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Active recipe must not be empty".to_string(),
            ));
        }

        if self.report_file.trim().is_empty() || self.report_file.contains(['/', '\\']) {
            return Err(ConfigError::ValidationFailed(format!(
                "Report file must be a plain file name: '{}'",
                self.report_file
            )));
        }

        if !is_valid_ref_fragment(&self.branch_prefix) {
            return Err(ConfigError::ValidationFailed(format!(
                "Branch prefix is not a valid git ref fragment: '{}'",
                self.branch_prefix
            )));
        }

        if self.commit_message.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Commit message must not be empty".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Engine arguments with the active recipe substituted
    pub fn resolved_engine_args(&self) -> Vec<String> {
        self.engine_args
            .iter()
            .map(|arg| arg.replace(ACTIVE_RECIPE_PLACEHOLDER, &self.active_recipe))
            .collect()
    }
}

fn is_valid_ref_fragment(prefix: &str) -> bool {
    let Ok(forbidden) = Regex::new(r"[\s~^:?*\[\\]|\.\.|@\{") else {
        return false;
    };
    !prefix.is_empty()
        && !prefix.starts_with(['-', '/', '.'])
        && !prefix.ends_with(['/', '.'])
        && !forbidden.is_match(prefix)
}

impl fmt::Display for SpringshiftConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Springshift Configuration:")?;
        writeln!(f, "  Work Root: {}", self.work_root.display())?;
        match &self.fragments_dir {
            Some(dir) => writeln!(f, "  Fragments: {}", dir.display())?,
            None => writeln!(f, "  Fragments: built-in")?,
        }
        match &self.feature_catalog {
            Some(path) => writeln!(f, "  Feature Catalog: {}", path.display())?,
            None => writeln!(f, "  Feature Catalog: built-in")?,
        }
        writeln!(
            f,
            "  Engine: {} {}",
            self.engine_program,
            self.resolved_engine_args().join(" ")
        )?;
        writeln!(f, "  Log Dir: {}", self.log_dir.display())?;
        writeln!(f, "  Report File: {}", self.report_file)?;
        writeln!(f, "  Branch Prefix: {}", self.branch_prefix)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}
