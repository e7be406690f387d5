//! External rewrite engine
//!
//! The engine reads the composed recipe document from the workspace root and
//! rewrites sources in place. Its combined stdout and stderr go to a log file.

use crate::config::SpringshiftConfig;
use async_trait::async_trait;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

/// Log file the engine writes inside the workspace
pub const ENGINE_LOG_FILE: &str = "execution.log";

#[derive(Debug, Error)]
pub enum ToolInvocationError {
    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}; see {}", .log_path.display())]
    NonZeroExit {
        program: String,
        status: String,
        exit_code: Option<i32>,
        log_path: PathBuf,
    },

    #[error("Failed to create engine log {}: {source}", .path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A completed engine run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRun {
    pub log_path: PathBuf,
    pub exit_code: Option<i32>,
}

#[async_trait]
pub trait RewriteEngine: Send + Sync {
    /// Runs the engine against `workdir`, writing its output to `log_path`.
    ///
    /// A non-zero exit is an error, but the log is still written.
    async fn run(&self, workdir: &Path, log_path: &Path) -> Result<EngineRun, ToolInvocationError>;
}

/// Runs a configured program, e.g. `mvn ... rewrite-maven-plugin:run`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEngine {
    program: String,
    args: Vec<String>,
}

impl CommandEngine {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &SpringshiftConfig) -> Self {
        Self::new(config.engine_program.clone(), config.resolved_engine_args())
    }
}

#[async_trait]
impl RewriteEngine for CommandEngine {
    async fn run(&self, workdir: &Path, log_path: &Path) -> Result<EngineRun, ToolInvocationError> {
        let log_error = |source| ToolInvocationError::Log {
            path: log_path.to_path_buf(),
            source,
        };
        let stdout = File::create(log_path).map_err(log_error)?;
        let stderr = stdout.try_clone().map_err(log_error)?;

        info!(
            program = %self.program,
            args = %self.args.join(" "),
            workdir = %workdir.display(),
            "Running rewrite engine"
        );
        let start = Instant::now();

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()
            .await
            .map_err(|source| ToolInvocationError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let elapsed_ms = start.elapsed().as_millis();
        if status.success() {
            info!(elapsed_ms, "Rewrite engine finished");
            Ok(EngineRun {
                log_path: log_path.to_path_buf(),
                exit_code: status.code(),
            })
        } else {
            warn!(elapsed_ms, status = %status, "Rewrite engine failed");
            Err(ToolInvocationError::NonZeroExit {
                program: self.program.clone(),
                status: status.to_string(),
                exit_code: status.code(),
                log_path: log_path.to_path_buf(),
            })
        }
    }
}
