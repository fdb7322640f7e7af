//! Forecast command implementation.
//!
//! Prints historical and projected FCF side by side, the data behind an FCF chart.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use intrinsic_analytics::dcf::{chart_series, project_cash_flows, SeriesPoint};
use intrinsic_config::ValuationConfig;

use crate::cli::OutputFormat;
use crate::commands::value::load_history;
use crate::commands::AssumptionArgs;
use crate::output::{format_millions, print_header, print_json_value, print_output};

/// Arguments for the forecast command.
#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Historical FCF file (CSV with Year and FCF columns, FCF in millions)
    #[arg(long)]
    pub history: PathBuf,

    #[command(flatten)]
    pub assumptions: AssumptionArgs,
}

/// One displayed row of the series.
#[derive(Debug, Serialize, Tabled)]
struct SeriesRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "FCF")]
    fcf: String,
    #[tabled(rename = "Discount Factor")]
    discount_factor: String,
    #[tabled(rename = "Discounted FCF")]
    discounted_fcf: String,
}

impl From<&SeriesPoint> for SeriesRow {
    fn from(point: &SeriesPoint) -> Self {
        Self {
            year: point.year,
            kind: point.kind.to_string(),
            fcf: format_millions(point.fcf),
            discount_factor: point
                .discount_factor
                .map_or_else(|| "-".to_string(), |df| format!("{df:.6}")),
            discounted_fcf: point
                .discounted_fcf
                .map_or_else(|| "-".to_string(), format_millions),
        }
    }
}

/// Executes the forecast command.
pub async fn execute(
    args: ForecastArgs,
    config: &ValuationConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let assumptions = args.assumptions.resolve(config)?;
    assumptions.validate()?;
    config.constants().validate()?;
    let history = load_history(&args.history).await?;

    let forecast = project_cash_flows(
        history.latest(),
        assumptions.growth_rate,
        assumptions.discount_rate,
        config.forecast_horizon_years,
    )?;
    let series = chart_series(&history, &forecast);

    match format {
        OutputFormat::Json => print_json_value(&series)?,
        OutputFormat::Minimal => {
            for point in &series {
                println!("{} {}", point.year, point.fcf);
            }
        }
        OutputFormat::Table | OutputFormat::Csv => {
            if format == OutputFormat::Table && !quiet {
                print_header(&format!("{} Historical vs Forecasted FCF", config.name));
            }
            let rows: Vec<SeriesRow> = series.iter().map(SeriesRow::from).collect();
            print_output(&rows, format)?;
        }
    }

    Ok(())
}
