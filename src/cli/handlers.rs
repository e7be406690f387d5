//! Command handlers. Each returns the process exit code.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{debug, error, info};

use super::commands::{AnalyzeArgs, MigrateArgs, PlanArgs, RecipeFormatArg, SourceArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::SpringshiftConfig;
use crate::features::FeatureCatalog;
use crate::pipeline::{MigrationOrchestrator, PipelineContext};
use crate::plan::{plan, MigrationChoice};
use crate::progress::{LoggingHandler, NoOpHandler, ProgressHandler};
use crate::recipe::{FragmentId, FragmentStore, RecipeComposer};
use crate::session::AnalysisSession;
use crate::vcs::{GitCli, VersionControl};

/// Branch analyzed when `--branch` is omitted
pub const DEFAULT_BRANCH: &str = "main";

fn load_config() -> Result<SpringshiftConfig> {
    let config = SpringshiftConfig::default();
    config.validate().context("Configuration error")?;
    debug!("{}", config);
    Ok(config)
}

fn load_catalog(config: &SpringshiftConfig) -> Result<FeatureCatalog> {
    match &config.feature_catalog {
        Some(path) => FeatureCatalog::load(path)
            .with_context(|| format!("Failed to load feature catalog {}", path.display())),
        None => Ok(FeatureCatalog::builtin()),
    }
}

fn local_workspace(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        bail!("Workspace path is not a directory: {}", path.display());
    }
    path.canonicalize()
        .with_context(|| format!("Failed to canonicalize {}", path.display()))
}

/// Fills `session` from either a fresh clone or a local checkout, analyzed in place
async fn analyze_source(
    session: &mut AnalysisSession,
    config: &SpringshiftConfig,
    source: &SourceArgs,
    branch: &str,
) -> Result<()> {
    match (&source.repo, &source.path) {
        (Some(url), _) => {
            info!("Cloning {} ({})", url, branch);
            let vcs = GitCli::new(config.commit_message.clone());
            session
                .clone_and_analyze(&vcs, url, branch, &config.work_root)
                .await?;
        }
        (None, Some(path)) => {
            let workspace = local_workspace(path)?;
            session.analyze(&workspace, branch);
        }
        (None, None) => bail!("Either --repo or --path is required"),
    }
    Ok(())
}

/// Clones the migration source into a fresh workspace under `work_root`.
///
/// A local checkout is cloned like a remote one. Reset empties the workspace
/// it runs in, so it must never run in the operator's own tree.
async fn prepare_migration(
    session: &mut AnalysisSession,
    vcs: &dyn VersionControl,
    config: &SpringshiftConfig,
    source: &SourceArgs,
    branch: &str,
) -> Result<()> {
    let url = match (&source.repo, &source.path) {
        (Some(url), _) => url.clone(),
        (None, Some(path)) => local_workspace(path)?.to_string_lossy().into_owned(),
        (None, None) => bail!("Either --repo or --path is required"),
    };
    info!("Cloning {} ({})", url, branch);
    session
        .clone_and_analyze(vcs, &url, branch, &config.work_root)
        .await?;
    Ok(())
}

pub async fn run_analyze(args: &AnalyzeArgs) -> Result<String> {
    let config = load_config()?;
    let mut session = AnalysisSession::new(load_catalog(&config)?);
    let branch = args.branch.as_deref().unwrap_or(DEFAULT_BRANCH);

    analyze_source(&mut session, &config, &args.source, branch).await?;
    let analysis = session
        .current()
        .context("Analysis produced no result")?;

    OutputFormatter::new(args.format.into()).format_analysis(analysis)
}

/// Composes the recipe document the choice would produce
pub fn run_plan(args: &PlanArgs) -> Result<String> {
    let config = load_config()?;
    let choice = MigrationChoice::from(&args.choice);
    let plan = plan(&choice);
    for line in &plan.narrative {
        info!("{}", line);
    }

    let composer = RecipeComposer::new(FragmentStore::from_dir(config.fragments_dir.as_deref()));
    let document = composer
        .compose(&plan.fragments)?
        .with_name(&config.active_recipe);

    let rendered = match args.format {
        RecipeFormatArg::Yaml => document.to_yaml()?,
        RecipeFormatArg::Json => document.to_json()?,
    };
    Ok(rendered)
}

pub async fn run_migrate(args: &MigrateArgs, quiet: bool) -> Result<String> {
    let config = load_config()?;
    let mut session = AnalysisSession::new(load_catalog(&config)?);
    let vcs = GitCli::new(config.commit_message.clone());
    prepare_migration(&mut session, &vcs, &config, &args.source, &args.branch).await?;

    if let Some(analysis) = session.current() {
        for warning in &analysis.warnings {
            info!("Analysis warning: {}", warning);
        }
    }

    let mut run = session.begin_migration(MigrationChoice::from(&args.choice))?;
    let progress: Arc<dyn ProgressHandler> = if quiet {
        Arc::new(NoOpHandler)
    } else {
        Arc::new(LoggingHandler)
    };
    let orchestrator =
        MigrationOrchestrator::new(PipelineContext::from_config(&config)).with_progress(progress);

    let outcome = orchestrator.execute(&mut run).await?;
    OutputFormatter::new(OutputFormat::Human).format_outcome(&outcome)
}

pub fn run_fragments() -> Result<String> {
    OutputFormatter::new(OutputFormat::Human).format_fragments(FragmentId::all_variants())
}

fn finish(result: Result<String>) -> i32 {
    match result {
        Ok(output) => {
            print!("{}", output);
            0
        }
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

pub async fn handle_analyze(args: &AnalyzeArgs) -> i32 {
    info!("Starting analysis");
    finish(run_analyze(args).await)
}

pub fn handle_plan(args: &PlanArgs) -> i32 {
    finish(run_plan(args))
}

pub async fn handle_migrate(args: &MigrateArgs, quiet: bool) -> i32 {
    info!("Starting migration from branch {}", args.branch);
    finish(run_migrate(args, quiet).await)
}

pub fn handle_fragments() -> i32 {
    finish(run_fragments())
}
