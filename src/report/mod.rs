//! Human-readable change report written into the migrated workspace

use crate::features::FeatureStatus;
use crate::plan::FileOperationError;
use std::fmt;
use std::path::{Path, PathBuf};

pub struct ChangeReport<'a> {
    pub features: &'a FeatureStatus,
    pub narrative: &'a [String],
}

impl<'a> ChangeReport<'a> {
    pub fn new(features: &'a FeatureStatus, narrative: &'a [String]) -> Self {
        Self {
            features,
            narrative,
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Writes the report to `dir/file_name`
    pub fn write_to(&self, dir: &Path, file_name: &str) -> Result<PathBuf, FileOperationError> {
        let path = dir.join(file_name);
        std::fs::write(&path, self.render())
            .map_err(|e| FileOperationError::new("write", &path, e))?;
        Ok(path)
    }
}

impl fmt::Display for ChangeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = self.features.platform_version.as_deref().unwrap_or("unknown");

        writeln!(f, "# Migration changes\n")?;
        writeln!(f, "Following are the features of your application.\n")?;
        writeln!(f, "Spring Boot version: {}\n", version)?;

        let width = self
            .features
            .rows
            .iter()
            .map(|row| row.label.len())
            .chain(std::iter::once("Feature".len()))
            .max()
            .unwrap_or(0);
        writeln!(f, "| {:<width$} | Status    |", "Feature")?;
        writeln!(f, "|{}|-----------|", "-".repeat(width + 2))?;
        for row in &self.features.rows {
            writeln!(f, "| {:<width$} | {:<9} |", row.label, row.status())?;
        }

        if !self.narrative.is_empty() {
            writeln!(f, "\n## Applied options\n")?;
            for line in self.narrative {
                writeln!(f, "- {}", line)?;
            }
        }
        Ok(())
    }
}
