//! Fixed catalog of recipe fragment files

use super::CompositionError;
use std::fmt;
use std::str::FromStr;

macro_rules! define_fragments {
    (
        $(#[$enum_meta:meta])*
        $enum_name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $short:literal : $file:literal
            ),* $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $enum_name {
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $enum_name {
            /// Short name used on the command line
            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant => $short, )*
                }
            }

            /// File name of the fragment document
            pub fn file_name(&self) -> &'static str {
                match self {
                    $( Self::$variant => $file, )*
                }
            }

            /// Accepts either the short name or the file name
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $( $short | $file => Some(Self::$variant), )*
                    _ => None,
                }
            }

            pub fn all_variants() -> &'static [Self] {
                &[ $( Self::$variant, )* ]
            }
        }

        impl serde::Serialize for $enum_name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(self.name())
            }
        }
    };
}

define_fragments! {
    FragmentId {
        ManifestCleanup => "manifest-cleanup" : "rewrite-manifestCleanup.yml",
        PostgresConnectorCleanup => "postgres-connector-cleanup" : "rewrite-postgresConnectorCleanup.yml",
        SpringCloudPcfCleanup => "spring-cloud-pcf-cleanup" : "rewrite-springCloudPcfCleanup.yml",
        AzureAd => "azure-ad" : "rewrite-azureAD.yml",
        Java17 => "java17" : "rewrite-java17.yml",
        VaultCleanup => "vault-cleanup" : "rewrite-vaultCleanup.yml",
        RedisConnectorCleanup => "redis-connector-cleanup" : "rewrite-redisConnectorCleanup.yml",
        LegacyAuthCleanup => "legacy-auth-cleanup" : "rewrite-legacyAuthCleanup.yml",
    }
}

impl FragmentId {
    /// Fragments merged into every plan, in merge order
    pub const BASELINE: [FragmentId; 3] = [
        FragmentId::ManifestCleanup,
        FragmentId::PostgresConnectorCleanup,
        FragmentId::SpringCloudPcfCleanup,
    ];

    pub(crate) fn embedded_source(&self) -> &'static str {
        match self {
            Self::ManifestCleanup => include_str!("../../recipes/rewrite-manifestCleanup.yml"),
            Self::PostgresConnectorCleanup => {
                include_str!("../../recipes/rewrite-postgresConnectorCleanup.yml")
            }
            Self::SpringCloudPcfCleanup => {
                include_str!("../../recipes/rewrite-springCloudPcfCleanup.yml")
            }
            Self::AzureAd => include_str!("../../recipes/rewrite-azureAD.yml"),
            Self::Java17 => include_str!("../../recipes/rewrite-java17.yml"),
            Self::VaultCleanup => include_str!("../../recipes/rewrite-vaultCleanup.yml"),
            Self::RedisConnectorCleanup => {
                include_str!("../../recipes/rewrite-redisConnectorCleanup.yml")
            }
            Self::LegacyAuthCleanup => include_str!("../../recipes/rewrite-legacyAuthCleanup.yml"),
        }
    }
}

impl FromStr for FragmentId {
    type Err = CompositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim()).ok_or_else(|| CompositionError::UnknownFragment(s.to_string()))
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
