use oracle_tools::cli::commands::{CliArgs, Commands};
use oracle_tools::cli::handlers::{handle_check, handle_inspect, handle_run};
use oracle_tools::util::logging::{init_logging, parse_level, LoggingConfig};
use oracle_tools::{LauncherConfig, NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let config = LauncherConfig::default();
    init_logging_from_args(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", redacted(&args));

    let exit_code = match &args.command {
        Commands::Inspect(inspect_args) => handle_inspect(inspect_args, &config).await,
        Commands::Run(run_args) => handle_run(run_args, &config).await,
        Commands::Check(check_args) => handle_check(check_args, &config).await,
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let mut config = LoggingConfig::from_env();
    if let Some(level_str) = &args.log_level {
        config.level = parse_level(level_str);
    } else if args.verbose {
        config.level = Level::DEBUG;
    } else if args.quiet {
        config.level = Level::ERROR;
    }
    init_logging(config);
}

/// Debug form of the arguments without passwords
fn redacted(args: &CliArgs) -> String {
    match &args.command {
        Commands::Run(run) => format!(
            "run action={} db={} file={} extra={:?}",
            run.action,
            run.db,
            run.file.display(),
            run.extra
        ),
        other => format!("{:?}", other),
    }
}
