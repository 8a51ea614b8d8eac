use anyhow::Result;
use clap::Parser;
use cohesionmap::cli::{Cli, Commands};
use cohesionmap::commands::analyze::{analyze_project, AnalyzeOptions};
use cohesionmap::commands::init::init_config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
            min_fields,
            min_methods,
            threshold,
            ignore,
            verbosity,
        } => {
            init_logging(verbosity);
            analyze_project(AnalyzeOptions {
                path,
                format,
                output,
                min_fields,
                min_methods,
                threshold,
                ignore,
            })
        }
        Commands::Init { force } => {
            init_logging(0);
            init_config(force)
        }
    }
}

/// RUST_LOG takes precedence; -v flags raise the default filter.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
