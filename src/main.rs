//! skill-deps - npm dependency management for agent skills

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skill_deps::app::AppContext;
use skill_deps::cli::Cli;
use skill_deps::{DepsError, Result};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.robot {
                // Batch commands already emitted a partial report on stdout.
                if !matches!(e, DepsError::BatchFailed { .. }) {
                    let error_json = serde_json::json!({
                        "error": true,
                        "code": e.code(),
                        "message": e.to_string(),
                    });
                    println!("{}", serde_json::to_string(&error_json).unwrap_or_default());
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    skill_deps::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skill_deps=info",
        1 => "info,skill_deps=debug",
        2 => "debug,skill_deps=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        // JSON logging for robot mode
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
