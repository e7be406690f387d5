//! Output formatting for analysis results and migration outcomes
//!
//! JSON and YAML are meant for scripts; the human format mirrors the table
//! written into the change report.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

use crate::features::FeatureRow;
use crate::pipeline::MigrationOutcome;
use crate::recipe::FragmentId;
use crate::session::Analysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

/// Serializable view of an [`Analysis`]
#[derive(Debug, Serialize)]
struct AnalysisView<'a> {
    workspace: &'a Path,
    source_branch: &'a str,
    platform_version: Option<&'a str>,
    dependencies: Vec<String>,
    features: &'a [FeatureRow],
    warnings: &'a [String],
}

impl<'a> From<&'a Analysis> for AnalysisView<'a> {
    fn from(analysis: &'a Analysis) -> Self {
        Self {
            workspace: &analysis.workspace,
            source_branch: &analysis.source_branch,
            platform_version: analysis.features.platform_version.as_deref(),
            dependencies: analysis.dependencies.iter().map(|c| c.to_string()).collect(),
            features: &analysis.features.rows,
            warnings: &analysis.warnings,
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_analysis(&self, analysis: &Analysis) -> Result<String> {
        let view = AnalysisView::from(analysis);
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&view)
                .context("Failed to serialize analysis to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(&view).context("Failed to serialize analysis to YAML")
            }
            OutputFormat::Human => Ok(self.format_analysis_human(analysis)),
        }
    }

    pub fn format_outcome(&self, outcome: &MigrationOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(outcome)
                .context("Failed to serialize migration outcome to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(outcome)
                .context("Failed to serialize migration outcome to YAML"),
            OutputFormat::Human => Ok(self.format_outcome_human(outcome)),
        }
    }

    pub fn format_fragments(&self, fragments: &[FragmentId]) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(fragments)
                .context("Failed to serialize fragments to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(fragments).context("Failed to serialize fragments to YAML")
            }
            OutputFormat::Human => {
                let width = fragments.iter().map(|f| f.name().len()).max().unwrap_or(0);
                let mut out = String::new();
                for fragment in fragments {
                    let _ = writeln!(out, "{:<width$}  {}", fragment.name(), fragment.file_name());
                }
                Ok(out)
            }
        }
    }

    fn format_analysis_human(&self, analysis: &Analysis) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Workspace: {}", analysis.workspace.display());
        let _ = writeln!(
            out,
            "Spring Boot version: {}",
            analysis
                .features
                .platform_version
                .as_deref()
                .unwrap_or("unknown")
        );
        let _ = writeln!(out, "Dependencies: {}\n", analysis.dependencies.len());

        let width = analysis
            .features
            .rows
            .iter()
            .map(|row| row.label.len())
            .max()
            .unwrap_or(0);
        for row in &analysis.features.rows {
            let _ = writeln!(out, "  {:<width$}  {}", row.label, row.status());
        }

        if !analysis.warnings.is_empty() {
            let _ = writeln!(out, "\nWarnings:");
            for warning in &analysis.warnings {
                let _ = writeln!(out, "  - {}", warning);
            }
        }
        out
    }

    fn format_outcome_human(&self, outcome: &MigrationOutcome) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Published branch: {}", outcome.branch);
        match outcome.engine_exit {
            Some(code) => {
                let _ = writeln!(out, "Rewrite engine exit code: {}", code);
            }
            None => {
                let _ = writeln!(out, "Rewrite engine exit code: none");
            }
        }
        if let Some(log) = &outcome.log_path {
            let _ = writeln!(out, "Execution log: {}", log.display());
        }
        if let Some(report) = &outcome.report_path {
            let _ = writeln!(out, "Change report: {}", report.display());
        }
        if !outcome.warnings.is_empty() {
            let _ = writeln!(out, "\nWarnings:");
            for warning in &outcome.warnings {
                let _ = writeln!(out, "  - {}", warning);
            }
        }
        out
    }
}
