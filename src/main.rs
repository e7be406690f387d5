use springshift::cli::commands::{CliArgs, Commands};
use springshift::cli::handlers::{handle_analyze, handle_fragments, handle_migrate, handle_plan};
use springshift::util::logging::{init_logging, json_from_env, parse_level, LoggingConfig};
use springshift::VERSION;

use clap::Parser;
use std::env;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("springshift v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Analyze(analyze_args) => handle_analyze(analyze_args).await,
        Commands::Plan(plan_args) => handle_plan(plan_args),
        Commands::Migrate(migrate_args) => handle_migrate(migrate_args, args.quiet).await,
        Commands::Fragments => handle_fragments(),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("SPRINGSHIFT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    };

    init_logging(LoggingConfig {
        level,
        use_json: json_from_env(),
        ..Default::default()
    });
}
