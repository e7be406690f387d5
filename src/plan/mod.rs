//! Translating operator choices into a migration plan
//!
//! The plan lists which recipe fragments to merge (in merge order), which files
//! to delete, and which folder of property files to convert. It also carries
//! the narrative lines that end up in the change report.

pub mod choice;
pub mod files;

pub use choice::{
    parse_file_list, IdentityTarget, JavaVersionTarget, MigrationChoice, SecretsStorageTarget,
    SpringBootTarget,
};
pub use files::{ConversionRequest, DeletionReport, FileDeletion, FileOperationError, VCS_DIR};

use crate::recipe::FragmentId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationPlan {
    /// Fragments in merge order
    pub fragments: Vec<FragmentId>,
    pub deletions: Vec<FileDeletion>,
    pub conversion: Option<ConversionRequest>,
    /// One line per applied option, for the change report
    pub narrative: Vec<String>,
}

/// Builds the plan for `choice`.
///
/// Phase order is fixed: baseline cleanups, identity, Java version, secrets
/// storage, Spring Boot version, optional cleanups, file deletions, conversion.
pub fn plan(choice: &MigrationChoice) -> MigrationPlan {
    let mut fragments: Vec<FragmentId> = FragmentId::BASELINE.to_vec();
    let mut narrative =
        vec!["Cleaning manifest files, Postgres connectors, Spring Cloud PCF libraries".to_string()];

    match choice.identity {
        IdentityTarget::Keep => {}
        IdentityTarget::Migrate => {
            fragments.push(FragmentId::AzureAd);
            narrative.push("Adding Azure AD related libraries".to_string());
        }
        IdentityTarget::Both => {
            fragments.push(FragmentId::AzureAd);
            narrative.push("Adding Azure AD related libraries alongside OpenAM".to_string());
        }
    }

    match choice.java_version {
        JavaVersionTarget::KeepAsIs => {}
        JavaVersionTarget::Java17 => {
            fragments.push(FragmentId::Java17);
            narrative.push("Rewriting to Java 17".to_string());
        }
    }

    // No fragments exist yet for secrets storage or Spring Boot upgrades; the
    // selection is still recorded so the report reflects what was asked for.
    match choice.secrets_storage {
        SecretsStorageTarget::Vault => {}
        target @ (SecretsStorageTarget::AwsSecretsManager | SecretsStorageTarget::Both) => {
            narrative.push(format!(
                "Secrets storage target recorded: {} (no automated recipe)",
                target
            ));
        }
    }

    match choice.spring_boot {
        SpringBootTarget::KeepAsIs => {}
        target @ (SpringBootTarget::LatestBoot2 | SpringBootTarget::LatestBoot3) => {
            narrative.push(format!(
                "Spring Boot target recorded: {} (no automated recipe)",
                target
            ));
        }
    }

    if choice.cleanup_vault {
        fragments.push(FragmentId::VaultCleanup);
        narrative.push("Cleaning up Vault".to_string());
    }
    if choice.cleanup_connectors {
        fragments.push(FragmentId::RedisConnectorCleanup);
        narrative.push("Cleaning Redis connector libraries".to_string());
    }
    if choice.cleanup_legacy_auth {
        fragments.push(FragmentId::LegacyAuthCleanup);
        narrative.push("Cleaning OpenAM libraries".to_string());
    }

    let deletions: Vec<FileDeletion> = choice
        .files_to_delete
        .iter()
        .map(FileDeletion::new)
        .collect();
    if !deletions.is_empty() {
        narrative.push(format!(
            "Requested deletion of: {}",
            choice.files_to_delete.join(", ")
        ));
    }

    let conversion = choice.convert_folder.as_deref().map(ConversionRequest::new);
    if let Some(request) = &conversion {
        narrative.push(format!(
            "Requested conversion of property files in '{}' to a ConfigMap",
            request.folder_name
        ));
    }

    MigrationPlan {
        fragments,
        deletions,
        conversion,
        narrative,
    }
}
