use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use att_cli::commands::report::{self, ReportRequest, criterion_from_flags};
use att_cli::{Cli, Commands, Config};
use att_core::QueryCriteria;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Some(Commands::Report {
            events,
            name,
            tag,
            date,
            location,
            json,
            anomalies_only,
        }) => {
            let config = Config::load_from(cli.config.as_deref())
                .context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");

            let request = ReportRequest {
                events,
                criteria: QueryCriteria {
                    name: criterion_from_flags(&name),
                    tag: criterion_from_flags(&tag),
                    date,
                    location: criterion_from_flags(&location),
                },
                json,
                anomalies_only,
            };
            report::run(&mut io::stdout().lock(), &config, &request)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
