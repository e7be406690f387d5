//! Property files to Kubernetes ConfigMap conversion

mod properties;

pub use properties::parse_properties;

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const CONFIG_MAP_FILE: &str = "configMap.yml";
const DEFAULT_CONFIG_MAP_NAME: &str = "application-config";

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No .properties files in {}", .0.display())]
    NoPropertyFiles(PathBuf),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize ConfigMap: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

pub trait PropertyConverter: Send + Sync {
    /// Converts the property files in `folder`, returning the produced artifact
    fn convert(&self, folder: &Path) -> Result<PathBuf, ConvertError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigMap {
    api_version: &'static str,
    kind: &'static str,
    metadata: Metadata,
    data: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct Metadata {
    name: String,
}

/// Flattens every `*.properties` file of a folder into one ConfigMap written
/// next to them. Files are read in name order; a key defined twice keeps the
/// value from the later file.
#[derive(Debug, Clone)]
pub struct ConfigMapConverter {
    name: String,
    output_file: String,
}

impl ConfigMapConverter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output_file: CONFIG_MAP_FILE.to_string(),
        }
    }

    fn property_files(folder: &Path) -> Result<Vec<PathBuf>, ConvertError> {
        let read_error = |source| ConvertError::Read {
            path: folder.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in std::fs::read_dir(folder).map_err(read_error)? {
            let path = entry.map_err(read_error)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "properties") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl Default for ConfigMapConverter {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_MAP_NAME)
    }
}

impl PropertyConverter for ConfigMapConverter {
    fn convert(&self, folder: &Path) -> Result<PathBuf, ConvertError> {
        let files = Self::property_files(folder)?;
        if files.is_empty() {
            return Err(ConvertError::NoPropertyFiles(folder.to_path_buf()));
        }

        let mut data = BTreeMap::new();
        for file in &files {
            let content = std::fs::read_to_string(file).map_err(|source| ConvertError::Read {
                path: file.clone(),
                source,
            })?;
            let entries = parse_properties(&content);
            debug!(file = %file.display(), entries = entries.len(), "Parsed property file");
            for (key, value) in entries {
                if let Some(previous) = data.insert(key.clone(), value) {
                    warn!(key = %key, previous = %previous, file = %file.display(), "Property overridden");
                }
            }
        }

        let config_map = ConfigMap {
            api_version: "v1",
            kind: "ConfigMap",
            metadata: Metadata {
                name: self.name.clone(),
            },
            data,
        };

        let output = folder.join(&self.output_file);
        let yaml = serde_yaml::to_string(&config_map)?;
        std::fs::write(&output, yaml).map_err(|source| ConvertError::Write {
            path: output.clone(),
            source,
        })?;

        info!(
            files = files.len(),
            output = %output.display(),
            "Converted property files"
        );
        Ok(output)
    }
}
