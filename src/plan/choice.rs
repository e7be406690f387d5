//! Operator selections for one migration

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentityTarget {
    /// Continue using OpenAM
    #[default]
    Keep,
    /// Migrate to Azure AD (Entra ID)
    Migrate,
    /// Use OpenAM and Azure AD side by side
    Both,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JavaVersionTarget {
    #[default]
    KeepAsIs,
    Java17,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecretsStorageTarget {
    #[default]
    Vault,
    AwsSecretsManager,
    Both,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpringBootTarget {
    #[default]
    KeepAsIs,
    LatestBoot2,
    LatestBoot3,
}

impl fmt::Display for SecretsStorageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Vault => "Vault",
            Self::AwsSecretsManager => "AWS Secrets Manager",
            Self::Both => "Vault and AWS Secrets Manager",
        })
    }
}

impl fmt::Display for SpringBootTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::KeepAsIs => "current version",
            Self::LatestBoot2 => "latest Spring Boot 2",
            Self::LatestBoot3 => "latest Spring Boot 3",
        })
    }
}

/// Everything the operator picked. Pure data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationChoice {
    pub identity: IdentityTarget,
    pub java_version: JavaVersionTarget,
    pub secrets_storage: SecretsStorageTarget,
    pub spring_boot: SpringBootTarget,
    pub cleanup_vault: bool,
    pub cleanup_connectors: bool,
    pub cleanup_legacy_auth: bool,
    /// File names (with extension) to delete anywhere in the workspace
    pub files_to_delete: Vec<String>,
    /// Directory name holding property files to convert
    pub convert_folder: Option<String>,
}

impl MigrationChoice {
    /// Sets `files_to_delete` from a comma-separated list
    pub fn with_files_to_delete(mut self, input: &str) -> Self {
        self.files_to_delete = parse_file_list(input);
        self
    }

    pub fn with_convert_folder(mut self, folder: &str) -> Self {
        let folder = folder.trim();
        self.convert_folder = (!folder.is_empty()).then(|| folder.to_string());
        self
    }
}

/// Splits a comma-separated list, trimming names and dropping empty pieces
pub fn parse_file_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
