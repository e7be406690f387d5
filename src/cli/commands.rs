use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::plan::{
    IdentityTarget, JavaVersionTarget, MigrationChoice, SecretsStorageTarget, SpringBootTarget,
};

/// Spring Boot platform migration assistant
#[derive(Parser, Debug)]
#[command(
    name = "springshift",
    about = "Spring Boot platform migration assistant",
    version,
    author,
    long_about = "springshift inspects a Spring Boot service's pom.xml, reports which \
                  platform integrations it uses, and composes an OpenRewrite recipe that \
                  migrates it away from Cloud Foundry era libraries. The migrated tree is \
                  pushed to a new branch."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'v',
        long,
        global = true,
        help = "Enable debug logging"
    )]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Report which platform integrations a service uses",
        long_about = "Clones a repository (or reads a local checkout) and matches the \
                      dependencies in its pom.xml against the feature catalog.\n\n\
                      Examples:\n  \
                      springshift analyze --path ./my-service\n  \
                      springshift analyze --repo https://git.example.com/team/svc.git --branch develop\n  \
                      springshift analyze --path ./my-service --format json"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Print the recipe document for a set of choices",
        long_about = "Composes the rewrite.yml a migration with these choices would use, \
                      without touching any workspace.\n\n\
                      Examples:\n  \
                      springshift plan --java 17 --identity migrate\n  \
                      springshift plan --cleanup-vault --format json"
    )]
    Plan(PlanArgs),

    #[command(
        about = "Analyze, rewrite and publish a migration branch",
        long_about = "Runs the full migration: compose the recipe, run the rewrite engine, \
                      collect the log and change report, delete and convert files, then \
                      commit and push to a new timestamped branch.\n\n\
                      Examples:\n  \
                      springshift migrate --repo https://git.example.com/team/svc.git --branch main --java 17\n  \
                      springshift migrate --path ./svc --branch main --delete-files VaultConfig.java"
    )]
    Migrate(MigrateArgs),

    #[command(about = "List the recipe fragment catalog")]
    Fragments,
}

/// Where the service comes from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    #[arg(long, value_name = "URL", help = "Git URL to clone into a fresh workspace")]
    pub repo: Option<String>,

    #[arg(long, value_name = "DIR", help = "Existing local checkout to use as workspace")]
    pub path: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, value_name = "BRANCH", help = "Branch to clone (defaults to main)")]
    pub branch: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub choice: ChoiceArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "yaml",
        help = "Recipe document format"
    )]
    pub format: RecipeFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, value_name = "BRANCH", help = "Branch the migration starts from")]
    pub branch: String,

    #[command(flatten)]
    pub choice: ChoiceArgs,
}

/// Operator choices shared by `plan` and `migrate`
#[derive(Args, Debug, Clone)]
pub struct ChoiceArgs {
    #[arg(long, value_enum, default_value = "keep", help = "Identity provider target")]
    pub identity: IdentityArg,

    #[arg(long, value_enum, default_value = "keep", help = "Java version target")]
    pub java: JavaArg,

    #[arg(long, value_enum, default_value = "vault", help = "Secrets storage target")]
    pub secrets: SecretsArg,

    #[arg(long, value_enum, default_value = "keep", help = "Spring Boot version target")]
    pub spring_boot: SpringBootArg,

    #[arg(long, help = "Remove Vault libraries and configuration")]
    pub cleanup_vault: bool,

    #[arg(long, help = "Remove Redis service connectors")]
    pub cleanup_connectors: bool,

    #[arg(long, help = "Remove legacy authentication libraries")]
    pub cleanup_legacy_auth: bool,

    #[arg(
        long,
        value_name = "FILES",
        help = "Comma-separated file names to delete anywhere in the workspace"
    )]
    pub delete_files: Option<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Folder of .properties files to convert to a ConfigMap"
    )]
    pub convert_folder: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityArg {
    Keep,
    Migrate,
    Both,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JavaArg {
    Keep,
    #[value(name = "17")]
    Java17,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretsArg {
    Vault,
    Aws,
    Both,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpringBootArg {
    Keep,
    #[value(name = "latest-2")]
    Latest2,
    #[value(name = "latest-3")]
    Latest3,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Human,
    Json,
    Yaml,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeFormatArg {
    Yaml,
    Json,
}

impl From<IdentityArg> for IdentityTarget {
    fn from(arg: IdentityArg) -> Self {
        match arg {
            IdentityArg::Keep => IdentityTarget::Keep,
            IdentityArg::Migrate => IdentityTarget::Migrate,
            IdentityArg::Both => IdentityTarget::Both,
        }
    }
}

impl From<JavaArg> for JavaVersionTarget {
    fn from(arg: JavaArg) -> Self {
        match arg {
            JavaArg::Keep => JavaVersionTarget::KeepAsIs,
            JavaArg::Java17 => JavaVersionTarget::Java17,
        }
    }
}

impl From<SecretsArg> for SecretsStorageTarget {
    fn from(arg: SecretsArg) -> Self {
        match arg {
            SecretsArg::Vault => SecretsStorageTarget::Vault,
            SecretsArg::Aws => SecretsStorageTarget::AwsSecretsManager,
            SecretsArg::Both => SecretsStorageTarget::Both,
        }
    }
}

impl From<SpringBootArg> for SpringBootTarget {
    fn from(arg: SpringBootArg) -> Self {
        match arg {
            SpringBootArg::Keep => SpringBootTarget::KeepAsIs,
            SpringBootArg::Latest2 => SpringBootTarget::LatestBoot2,
            SpringBootArg::Latest3 => SpringBootTarget::LatestBoot3,
        }
    }
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => super::output::OutputFormat::Human,
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
        }
    }
}

impl From<&ChoiceArgs> for MigrationChoice {
    fn from(args: &ChoiceArgs) -> Self {
        let choice = MigrationChoice {
            identity: args.identity.into(),
            java_version: args.java.into(),
            secrets_storage: args.secrets.into(),
            spring_boot: args.spring_boot.into(),
            cleanup_vault: args.cleanup_vault,
            cleanup_connectors: args.cleanup_connectors,
            cleanup_legacy_auth: args.cleanup_legacy_auth,
            ..Default::default()
        };
        let choice = match &args.delete_files {
            Some(files) => choice.with_files_to_delete(files),
            None => choice,
        };
        match &args.convert_folder {
            Some(folder) => choice.with_convert_folder(folder),
            None => choice,
        }
    }
}
