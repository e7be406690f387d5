//! Feature catalog: which dependency coordinates imply which integration

use crate::config::ConfigError;
use crate::manifest::DependencyCoordinate;
use serde::Deserialize;
use std::path::Path;

/// Built-in catalog of platform integrations typical for Cloud Foundry era
/// Spring Boot services. Several coordinates may share a label.
const DEFAULT_ENTRIES: &[(&str, &str, &str)] = &[
    (
        "org.springframework.cloud",
        "spring-cloud-starter-vault-config",
        "Vault",
    ),
    ("org.springframework.vault", "spring-vault-core", "Vault"),
    (
        "org.springframework.cloud",
        "spring-cloud-cloudfoundry-connector",
        "Cloud Foundry Connectors",
    ),
    (
        "org.springframework.cloud",
        "spring-cloud-spring-service-connector",
        "Cloud Foundry Connectors",
    ),
    ("io.pivotal.cfenv", "java-cfenv-boot", "Cloud Foundry Environment"),
    (
        "io.pivotal.spring.cloud",
        "spring-cloud-services-starter-config-client",
        "Spring Cloud Services Config",
    ),
    (
        "io.pivotal.spring.cloud",
        "spring-cloud-services-starter-service-registry",
        "Spring Cloud Services Registry",
    ),
    ("org.postgresql", "postgresql", "PostgreSQL"),
    (
        "org.springframework.boot",
        "spring-boot-starter-data-redis",
        "Redis",
    ),
    (
        "org.springframework.boot",
        "spring-boot-starter-security",
        "Spring Security",
    ),
    (
        "org.springframework.boot",
        "spring-boot-starter-oauth2-client",
        "OAuth2 Client",
    ),
    ("org.forgerock.openam", "openam-clientsdk", "OpenAM"),
    (
        "com.azure.spring",
        "spring-cloud-azure-starter-active-directory",
        "Azure AD",
    ),
    ("software.amazon.awssdk", "secretsmanager", "AWS Secrets Manager"),
    (
        "org.springframework.boot",
        "spring-boot-starter-actuator",
        "Actuator",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub coordinate: DependencyCoordinate,
    pub label: String,
}

/// Ordered coordinate to label mapping. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCatalog {
    entries: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    features: Vec<CatalogFileEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogFileEntry {
    coordinate: String,
    label: String,
}

impl FeatureCatalog {
    /// # Errors
    ///
    /// `ConfigError::EmptyCatalog` when `entries` is empty
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(Self { entries })
    }

    pub fn builtin() -> Self {
        Self {
            entries: DEFAULT_ENTRIES
                .iter()
                .map(|(group, artifact, label)| CatalogEntry {
                    coordinate: DependencyCoordinate::new(*group, *artifact),
                    label: label.to_string(),
                })
                .collect(),
        }
    }

    /// Loads a catalog from YAML:
    ///
    /// ```yaml
    /// features:
    ///   - coordinate: com.example:auth-lib
    ///     label: Legacy Auth
    /// ```
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let file: CatalogFile =
            serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
                path: origin.to_path_buf(),
                source,
            })?;

        let entries = file
            .features
            .into_iter()
            .map(|entry| {
                DependencyCoordinate::parse(&entry.coordinate)
                    .map(|coordinate| CatalogEntry {
                        coordinate,
                        label: entry.label.trim().to_string(),
                    })
                    .ok_or_else(|| {
                        ConfigError::ValidationFailed(format!(
                            "Invalid coordinate '{}' in {}; expected group:artifact",
                            entry.coordinate,
                            origin.display()
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(entries)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content, path)
    }

    pub fn label_for(&self, coordinate: &DependencyCoordinate) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| &entry.coordinate == coordinate)
            .map(|entry| entry.label.as_str())
    }

    /// Distinct labels in declaration order
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !labels.contains(&entry.label.as_str()) {
                labels.push(&entry.label);
            }
        }
        labels
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

impl Default for FeatureCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
