//! tk205 CLI: the `tk205` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    match cli.command {
        Commands::Validate {
            path,
            schema_dir,
            json,
        } => commands::validate::run(config, path, schema_dir, json),

        Commands::Translate {
            input,
            output,
            json,
        } => commands::translate::run(input, output, json),

        Commands::Inspect {
            path,
            validate,
            schema_dir,
            escalate_at,
            json,
        } => commands::inspect::run(commands::inspect::Args {
            config,
            path,
            validate,
            schema_dir,
            escalate_at: escalate_at.map(Into::into),
            json,
        }),

        Commands::Calc {
            path,
            map,
            embedded,
            target,
            extrapolation,
            json,
        } => commands::calc::run(commands::calc::Args {
            config,
            path,
            map,
            embedded,
            target,
            extrapolation: extrapolation.map(Into::into),
            json,
        }),
    }
}
