//! Intrinsic CLI - Command-line interface for DCF equity valuation.
//!
//! # Usage
//!
//! ```bash
//! # Value the configured company from a history file
//! intrinsic value --history data/meta_fcf_data.csv --market-price 512.5
//!
//! # Override the assumptions
//! intrinsic value --history data/meta_fcf_data.csv --growth 0.15 --wacc 0.09 --terminal-growth 0.03
//!
//! # Historical and forecast FCF as JSON
//! intrinsic --format json forecast --history data/meta_fcf_data.csv
//!
//! # Write a starter configuration
//! intrinsic config init intrinsic.toml
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use intrinsic_config::ValuationConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = ValuationConfig::load_or_default(cli.config.as_ref())?;
    let format = cli.format;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Value(args) => commands::value::execute(args, &config, format, quiet).await,
        Commands::Forecast(args) => {
            commands::forecast::execute(args, &config, format, quiet).await
        }
        Commands::Config(args) => commands::config::execute(args, &config, format, quiet),
    }
}
