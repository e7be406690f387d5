//! Feature matching: which catalogued integrations a manifest uses

pub mod catalog;

pub use catalog::{CatalogEntry, FeatureCatalog};

use crate::manifest::DependencySet;
use serde::Serialize;

/// Label of the row that signals the manifest was analyzed at all
pub const PLATFORM_VERSION_LABEL: &str = "Spring Boot version";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureRow {
    pub label: String,
    pub found: bool,
}

impl FeatureRow {
    pub fn status(&self) -> &'static str {
        if self.found {
            "FOUND"
        } else {
            "NOT FOUND"
        }
    }
}

/// Found / not-found table in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureStatus {
    pub platform_version: Option<String>,
    pub rows: Vec<FeatureRow>,
}

impl FeatureStatus {
    pub fn is_found(&self, label: &str) -> bool {
        self.rows.iter().any(|row| row.label == label && row.found)
    }

    pub fn found_labels(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter(|row| row.found)
            .map(|row| row.label.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Intersects `dependencies` with `catalog`.
///
/// `analysis_ran` marks the synthetic platform-version row as found; pass
/// `Extraction::succeeded()`. Coordinates outside the catalog are ignored.
pub fn match_features(
    dependencies: &DependencySet,
    catalog: &FeatureCatalog,
    analysis_ran: bool,
) -> FeatureStatus {
    let found: Vec<&str> = dependencies
        .iter()
        .filter_map(|coordinate| catalog.label_for(coordinate))
        .collect();

    let mut rows = Vec::with_capacity(catalog.entries().len() + 1);
    rows.push(FeatureRow {
        label: PLATFORM_VERSION_LABEL.to_string(),
        found: analysis_ran,
    });
    rows.extend(catalog.labels().into_iter().map(|label| FeatureRow {
        label: label.to_string(),
        found: found.contains(&label),
    }));

    FeatureStatus {
        platform_version: dependencies.platform_version().map(str::to_string),
        rows,
    }
}
