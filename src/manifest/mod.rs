//! Maven POM dependency extraction
//!
//! Reads `dependencies/dependency` coordinates and the parent version out of a
//! `pom.xml`. Parsing is lenient: a malformed document degrades to an empty
//! [`DependencySet`] and a single [`ParseError`], while a malformed dependency
//! entry only drops that entry.

use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
pub const MANIFEST_FILE: &str = "pom.xml";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Failed to read {path}: {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("Malformed manifest: {0}")]
    Malformed(String),

    #[error("Dependency #{index} is missing <{field}>")]
    MissingField { index: usize, field: &'static str },

    #[error("<parent> declares no <version>")]
    ParentWithoutVersion,
}

impl ParseError {
    /// Whether the whole document was rejected rather than a single entry
    pub fn is_document_level(&self) -> bool {
        matches!(self, Self::Unreadable { .. } | Self::Malformed(_))
    }
}

/// A `(groupId, artifactId)` pair
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DependencyCoordinate {
    pub group_id: String,
    pub artifact_id: String,
}

impl DependencyCoordinate {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    /// Parses `group:artifact`
    pub fn parse(coordinate: &str) -> Option<Self> {
        let (group, artifact) = coordinate.split_once(':')?;
        let (group, artifact) = (group.trim(), artifact.trim());
        if group.is_empty() || artifact.is_empty() || artifact.contains(':') {
            return None;
        }
        Some(Self::new(group, artifact))
    }
}

impl fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Distinct coordinates found in one manifest, plus the parent version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencySet {
    coordinates: BTreeSet<DependencyCoordinate>,
    platform_version: Option<String>,
}

impl DependencySet {
    pub fn new(
        coordinates: impl IntoIterator<Item = DependencyCoordinate>,
        platform_version: Option<String>,
    ) -> Self {
        Self {
            coordinates: coordinates.into_iter().collect(),
            platform_version,
        }
    }

    pub fn contains(&self, coordinate: &DependencyCoordinate) -> bool {
        self.coordinates.contains(coordinate)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DependencyCoordinate> {
        self.coordinates.iter()
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn platform_version(&self) -> Option<&str> {
        self.platform_version.as_deref()
    }
}

/// Result of parsing one manifest
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub dependencies: DependencySet,
    pub errors: Vec<ParseError>,
}

impl Extraction {
    /// False when the document itself could not be read or parsed
    pub fn succeeded(&self) -> bool {
        !self.errors.iter().any(ParseError::is_document_level)
    }

    fn failed(error: ParseError) -> Self {
        Self {
            dependencies: DependencySet::default(),
            errors: vec![error],
        }
    }
}

/// Extracts dependencies from the manifest at `path`
pub fn extract(path: &Path) -> Extraction {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let extraction = extract_str(&content);
            for error in &extraction.errors {
                warn!(manifest = %path.display(), "{}", error);
            }
            extraction
        }
        Err(e) => {
            let error = ParseError::Unreadable {
                path: path.to_path_buf(),
                message: e.to_string(),
            };
            warn!("{}", error);
            Extraction::failed(error)
        }
    }
}

/// Extracts dependencies from manifest content
pub fn extract_str(content: &str) -> Extraction {
    let doc = match Document::parse(content) {
        Ok(doc) => doc,
        Err(e) => return Extraction::failed(ParseError::Malformed(e.to_string())),
    };

    let root = doc.root_element();
    let mut errors = Vec::new();
    let mut coordinates = BTreeSet::new();

    let dependencies = root
        .descendants()
        .filter(|n| is_pom_element(n, "dependencies"))
        .flat_map(|deps| deps.children().filter(|n| is_pom_element(n, "dependency")));

    for (index, dependency) in dependencies.enumerate() {
        let group_id = child_text(dependency, "groupId");
        let artifact_id = child_text(dependency, "artifactId");
        match (group_id, artifact_id) {
            (Some(group_id), Some(artifact_id)) => {
                coordinates.insert(DependencyCoordinate::new(group_id, artifact_id));
            }
            (None, _) => errors.push(ParseError::MissingField {
                index,
                field: "groupId",
            }),
            (Some(_), None) => errors.push(ParseError::MissingField {
                index,
                field: "artifactId",
            }),
        }
    }

    let platform_version = match root.children().find(|n| is_pom_element(n, "parent")) {
        Some(parent) => {
            let version = child_text(parent, "version");
            if version.is_none() {
                errors.push(ParseError::ParentWithoutVersion);
            }
            version
        }
        None => None,
    };

    debug!(
        dependencies = coordinates.len(),
        platform_version = platform_version.as_deref().unwrap_or("-"),
        skipped = errors.len(),
        "Parsed manifest"
    );

    Extraction {
        dependencies: DependencySet {
            coordinates,
            platform_version,
        },
        errors,
    }
}

/// Matches the tag name inside the POM namespace, or without any namespace
fn is_pom_element(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && matches!(node.tag_name().namespace(), None | Some(POM_NAMESPACE))
}

fn child_text(node: Node, name: &str) -> Option<String> {
    node.children()
        .find(|n| is_pom_element(n, name))
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0"
         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
    <modelVersion>4.0.0</modelVersion>
    <parent>
        <groupId>org.springframework.boot</groupId>
        <artifactId>spring-boot-starter-parent</artifactId>
        <version>2.7.1</version>
    </parent>
    <artifactId>petclinic</artifactId>
    <dependencies>
        <dependency>
            <groupId>org.springframework.boot</groupId>
            <artifactId>spring-boot-starter-web</artifactId>
        </dependency>
        <dependency>
            <groupId>org.postgresql</groupId>
            <artifactId>postgresql</artifactId>
            <scope>runtime</scope>
        </dependency>
    </dependencies>
</project>"#;

    #[test]
    fn test_extracts_coordinates_and_parent_version() {
        let extraction = extract_str(POM);

        assert!(extraction.succeeded());
        assert!(extraction.errors.is_empty());
        assert_eq!(extraction.dependencies.len(), 2);
        assert!(extraction
            .dependencies
            .contains(&DependencyCoordinate::new("org.postgresql", "postgresql")));
        assert_eq!(extraction.dependencies.platform_version(), Some("2.7.1"));
    }

    #[test]
    fn test_missing_fields_skip_only_that_entry() {
        let pom = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
            <dependencies>
                <dependency><groupId>a</groupId><artifactId>one</artifactId></dependency>
                <dependency><artifactId>orphan</artifactId></dependency>
                <dependency><groupId>b</groupId></dependency>
                <dependency><groupId>c</groupId><artifactId>three</artifactId></dependency>
            </dependencies>
        </project>"#;

        let extraction = extract_str(pom);

        assert!(extraction.succeeded());
        assert_eq!(extraction.dependencies.len(), 2);
        assert_eq!(
            extraction.errors,
            vec![
                ParseError::MissingField {
                    index: 1,
                    field: "groupId"
                },
                ParseError::MissingField {
                    index: 2,
                    field: "artifactId"
                },
            ]
        );
    }

    #[test]
    fn test_no_parent_leaves_version_unset() {
        let pom = r#"<project xmlns="http://maven.apache.org/POM/4.0.0">
            <dependencies>
                <dependency><groupId>a</groupId><artifactId>b</artifactId></dependency>
            </dependencies>
        </project>"#;

        let extraction = extract_str(pom);
        assert!(extraction.errors.is_empty());
        assert_eq!(extraction.dependencies.platform_version(), None);
    }

    #[test]
    fn test_duplicate_dependencies_collapse() {
        let pom = r#"<project>
            <dependencies>
                <dependency><groupId>a</groupId><artifactId>b</artifactId></dependency>
                <dependency><groupId>a</groupId><artifactId>b</artifactId><scope>test</scope></dependency>
            </dependencies>
        </project>"#;

        assert_eq!(extract_str(pom).dependencies.len(), 1);
    }

    #[test]
    fn test_foreign_namespace_is_ignored() {
        let pom = r#"<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:x="urn:other">
            <x:dependencies>
                <x:dependency><x:groupId>a</x:groupId><x:artifactId>b</x:artifactId></x:dependency>
            </x:dependencies>
        </project>"#;

        assert!(extract_str(pom).dependencies.is_empty());
    }

    #[test]
    fn test_malformed_xml_degrades_to_empty_set() {
        let extraction = extract_str("<project><dependencies></project>");

        assert!(!extraction.succeeded());
        assert!(extraction.dependencies.is_empty());
        assert!(matches!(extraction.errors[0], ParseError::Malformed(_)));
    }

    #[test]
    fn test_extract_missing_file() {
        let dir = TempDir::new().unwrap();
        let extraction = extract(&dir.path().join(MANIFEST_FILE));

        assert!(!extraction.succeeded());
        assert!(matches!(
            extraction.errors[0],
            ParseError::Unreadable { .. }
        ));
    }

    #[test]
    fn test_extract_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(&path, POM).unwrap();

        let extraction = extract(&path);
        assert_eq!(extraction.dependencies.len(), 2);
    }

    #[test]
    fn test_coordinate_parse_and_display() {
        let coordinate = DependencyCoordinate::parse("com.example:auth-lib").unwrap();
        assert_eq!(coordinate.group_id, "com.example");
        assert_eq!(coordinate.to_string(), "com.example:auth-lib");

        assert!(DependencyCoordinate::parse("no-colon").is_none());
        assert!(DependencyCoordinate::parse(":artifact").is_none());
        assert!(DependencyCoordinate::parse("a:b:c").is_none());
    }
}
