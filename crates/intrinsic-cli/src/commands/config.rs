//! Config command implementation.
//!
//! Shows the active valuation configuration and writes a starter file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use intrinsic_config::{RangeBound, ValuationConfig};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{format_rate, print_header, print_output, print_success};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the active configuration
    Show,

    /// Write the default configuration to a TOML file
    Init(InitArgs),

    /// Show the allowed assumption ranges
    Bounds,
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination file
    #[arg(default_value = "intrinsic.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// One assumption range.
#[derive(Debug, Serialize, Tabled)]
struct BoundRow {
    #[tabled(rename = "Assumption")]
    assumption: String,
    #[tabled(rename = "Default")]
    default: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
    #[tabled(rename = "Step")]
    step: String,
    #[tabled(rename = "Choices")]
    choices: usize,
}

impl BoundRow {
    fn new(assumption: &str, default: f64, bound: &RangeBound) -> Self {
        Self {
            assumption: assumption.to_string(),
            default: format_rate(default),
            min: format_rate(bound.min),
            max: format_rate(bound.max),
            step: format_rate(bound.step),
            choices: bound.steps(),
        }
    }
}

/// Executes the config command.
pub fn execute(
    args: ConfigArgs,
    config: &ValuationConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(config, format),
        ConfigCommand::Init(init_args) => init(init_args, quiet),
        ConfigCommand::Bounds => bounds(config, format, quiet),
    }
}

fn show(config: &ValuationConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", config.to_json_string()?),
        _ => print!("{}", config.to_toml_string()?),
    }
    Ok(())
}

fn init(args: InitArgs, quiet: bool) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::FileExists(args.path).into());
    }

    ValuationConfig::default().write_toml(&args.path)?;
    if !quiet {
        print_success(&format!("Wrote {}", args.path.display()));
    }
    Ok(())
}

fn bounds(config: &ValuationConfig, format: OutputFormat, quiet: bool) -> Result<()> {
    let defaults = config.defaults;
    let rows = vec![
        BoundRow::new("FCF Growth Rate", defaults.growth_rate, &config.bounds.growth),
        BoundRow::new("Discount Rate (WACC)", defaults.discount_rate, &config.bounds.discount),
        BoundRow::new(
            "Terminal Growth Rate",
            defaults.terminal_growth_rate,
            &config.bounds.terminal_growth,
        ),
    ];

    if format == OutputFormat::Table && !quiet {
        print_header("Assumption Ranges");
    }
    print_output(&rows, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_row() {
        let config = ValuationConfig::default();
        let row = BoundRow::new("growth", 0.12, &config.bounds.growth);
        assert_eq!(row.default, "12.00%");
        assert_eq!(row.min, "5.00%");
        assert_eq!(row.max, "20.00%");
        assert_eq!(row.step, "1.00%");
        assert_eq!(row.choices, 16);
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intrinsic.toml");

        init(InitArgs { path: path.clone(), force: false }, true).unwrap();
        assert!(path.exists());

        let err = init(InitArgs { path: path.clone(), force: false }, true).unwrap_err();
        assert!(matches!(err.downcast_ref::<CliError>(), Some(CliError::FileExists(_))));

        init(InitArgs { path, force: true }, true).unwrap();
    }
}
