//! elastic-integration CLI
//!
//! Loads the filter configuration file, runs the connection validator and
//! reports the result without contacting any cluster.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use elastic_integration_core::config::{GeneralConfig, IntegrationConfig};

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        use colored::Colorize;
        eprintln!("{} {err}", "error:".red().bold());
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let loaded = IntegrationConfig::load(&cli.config).await;

    // Default logging settings when the file cannot be loaded.
    let general = loaded
        .as_ref()
        .map(|config| config.general.clone())
        .unwrap_or_else(|_| GeneralConfig::default());
    logging::init_tracing(&general, cli.log_level.as_deref())?;

    tracing::debug!(config = %cli.config.display(), "elastic-integration starting");

    let writer = OutputWriter::new(cli.output);
    match cli.command {
        Commands::Config(args) => commands::config::execute(args, &cli.config, loaded, &writer),
        Commands::Options(args) => commands::options::execute(args, &writer),
    }
}
