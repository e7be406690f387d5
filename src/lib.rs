//! springshift - Spring Boot platform migration assistant
//!
//! Analyzes a service's Maven manifest, reports which Cloud Foundry era
//! platform integrations it depends on, and drives an OpenRewrite based
//! migration of the service to a new git branch.
//!
//! # Core Concepts
//!
//! - **Analysis**: the dependency coordinates of `pom.xml` matched against a
//!   [`FeatureCatalog`], producing a found / not found [`FeatureStatus`] table
//! - **Recipe composition**: pre-authored fragment documents merged, in a fixed
//!   order, into one `rewrite.yml` for the rewrite engine
//! - **Migration run**: a sequence of states (compose, write config, run engine,
//!   collect artifacts, delete files, convert, publish, reset) where only
//!   compose, write config and publish can abort the run
//!
//! # Example Usage
//!
//! ```ignore
//! use springshift::{AnalysisSession, MigrationChoice, MigrationOrchestrator, PipelineContext, SpringshiftConfig};
//!
//! async fn migrate(workspace: &std::path::Path) -> anyhow::Result<()> {
//!     let config = SpringshiftConfig::default();
//!     let mut session = AnalysisSession::default();
//!     session.analyze(workspace, "main");
//!
//!     let mut run = session.begin_migration(MigrationChoice::default())?;
//!     let orchestrator = MigrationOrchestrator::new(PipelineContext::from_config(&config));
//!     let outcome = orchestrator.execute(&mut run).await?;
//!     println!("Published {}", outcome.branch);
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`manifest`]: POM dependency extraction
//! - [`features`]: feature catalog and matching
//! - [`recipe`]: fragment catalog, documents and composition
//! - [`plan`]: operator choices to fragments, deletions and conversion
//! - [`pipeline`]: the migration state machine
//! - [`vcs`], [`engine`], [`convert`]: external collaborators

pub mod cli;
pub mod config;
pub mod convert;
pub mod engine;
pub mod features;
pub mod manifest;
pub mod pipeline;
pub mod plan;
pub mod progress;
pub mod recipe;
pub mod report;
pub mod session;
pub mod util;
pub mod vcs;

// Re-export key types for convenient access
pub use config::{ConfigError, SpringshiftConfig};
pub use features::{match_features, FeatureCatalog, FeatureStatus};
pub use manifest::{extract, DependencyCoordinate, DependencySet, Extraction, ParseError};
pub use pipeline::{
    MigrationError, MigrationOrchestrator, MigrationOutcome, MigrationRun, MigrationState,
    PipelineConfig, PipelineContext,
};
pub use plan::{plan, MigrationChoice, MigrationPlan};
pub use recipe::{CompositionError, FragmentId, RecipeComposer, RecipeDocument};
pub use session::{Analysis, AnalysisSession, SessionError};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
