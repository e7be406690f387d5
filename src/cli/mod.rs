pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{AnalyzeArgs, ChoiceArgs, CliArgs, Commands, MigrateArgs, PlanArgs, SourceArgs};
pub use output::{OutputFormat, OutputFormatter};
