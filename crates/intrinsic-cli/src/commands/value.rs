//! Value command implementation.
//!
//! Runs the DCF valuation and compares the implied share price with a market price.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::{debug, warn};

use intrinsic_analytics::{Valuation, ValuationEngine, ValuationResult};
use intrinsic_config::ValuationConfig;
use intrinsic_core::{Assumptions, HistoricalSeries};
use intrinsic_ext_file::{CsvHistoricalSource, CsvPriceSource, EmptyPriceSource, StaticPriceSource};
use intrinsic_ext_http::YahooPriceSource;
use intrinsic_traits::{HistoricalDataSource, MarketQuote, PriceSource, Ticker};

use crate::cli::OutputFormat;
use crate::commands::AssumptionArgs;
use crate::output::{print_header, print_info, print_json_value, print_output, print_warning, KeyValue};

/// Arguments for the value command.
#[derive(Args, Debug)]
pub struct ValueArgs {
    /// Historical FCF file (CSV with Year and FCF columns, FCF in millions)
    #[arg(long)]
    pub history: PathBuf,

    #[command(flatten)]
    pub assumptions: AssumptionArgs,

    /// Current market price per share
    #[arg(short, long, conflicts_with_all = ["prices", "live"])]
    pub market_price: Option<f64>,

    /// Price file (CSV with ticker,price[,as_of] columns)
    #[arg(long, conflicts_with = "live")]
    pub prices: Option<PathBuf>,

    /// Fetch the latest close from Yahoo Finance
    #[arg(long)]
    pub live: bool,

    /// Quote API host for --live
    #[arg(long, env = "INTRINSIC_QUOTE_URL")]
    pub quote_url: Option<String>,

    /// Ticker to look up in the price file or quote API (defaults to the configured ticker)
    #[arg(long)]
    pub ticker: Option<String>,
}

/// Machine-readable valuation report.
#[derive(Debug, Serialize)]
struct ValueReport<'a> {
    company: &'a str,
    ticker: &'a str,
    assumptions: Assumptions,
    forecast_horizon_years: u32,
    net_debt: f64,
    shares_outstanding: f64,
    #[serde(flatten)]
    result: &'a ValuationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    quote: Option<&'a MarketQuote>,
}

/// Executes the value command.
pub async fn execute(
    args: ValueArgs,
    config: &ValuationConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let assumptions = args.assumptions.resolve(config)?;
    let history = load_history(&args.history).await?;

    let ticker = Ticker::new(args.ticker.as_deref().unwrap_or(&config.ticker));
    let prices = price_source(&args)?;
    let quote = prices.latest_price(&ticker).await?;
    if quote.is_none() && (args.prices.is_some() || args.live) {
        warn!(%ticker, source = ?prices.source_type(), "no quote");
        if !quiet {
            print_warning(&format!("No price for {ticker}; skipping market comparison."));
        }
    }

    let engine = ValuationEngine::new(config.constants())?;
    let valuation = engine.compute(&history, &assumptions, quote.as_ref().map(|q| q.price))?;
    debug!(
        implied = valuation.result.implied_share_price,
        "valuation complete"
    );

    match format {
        OutputFormat::Table => print_summary(config, &assumptions, &valuation, quiet)?,
        OutputFormat::Json => {
            let report = ValueReport {
                company: &config.name,
                ticker: ticker.as_str(),
                assumptions,
                forecast_horizon_years: config.forecast_horizon_years,
                net_debt: config.net_debt,
                shares_outstanding: config.shares_outstanding,
                result: &valuation.result,
                quote: quote.as_ref(),
            };
            print_json_value(&report)?;
        }
        OutputFormat::Csv => print_output(&summary_rows(&assumptions, &valuation.result), format)?,
        OutputFormat::Minimal => println!("{:.2}", valuation.result.implied_share_price),
    }

    Ok(())
}

/// Reads the historical series through the file source.
pub(crate) async fn load_history(path: &Path) -> Result<HistoricalSeries> {
    let source = CsvHistoricalSource::new(path);
    let history = source.load_history().await?;
    debug!(rows = history.len(), path = %path.display(), "loaded history");
    Ok(history)
}

/// Picks the price source: a manual price, a price file, a live quote, or none.
fn price_source(args: &ValueArgs) -> Result<Box<dyn PriceSource>> {
    let source: Box<dyn PriceSource> = match (args.market_price, args.prices.as_deref()) {
        (Some(price), _) => Box::new(StaticPriceSource::new(price)),
        (None, Some(path)) => Box::new(CsvPriceSource::new(path)?),
        (None, None) if args.live => {
            let source = YahooPriceSource::new();
            match &args.quote_url {
                Some(url) => Box::new(source.with_base_url(url.as_str())),
                None => Box::new(source),
            }
        }
        (None, None) => Box::new(EmptyPriceSource),
    };
    Ok(source)
}

fn summary_rows(assumptions: &Assumptions, result: &ValuationResult) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::from_rate("FCF Growth Rate", assumptions.growth_rate),
        KeyValue::from_rate("Discount Rate (WACC)", assumptions.discount_rate),
        KeyValue::from_rate("Terminal Growth Rate", assumptions.terminal_growth_rate),
        KeyValue::from_millions("Sum of Discounted FCF", result.sum_of_discounted_fcf),
        KeyValue::from_millions("Terminal Value", result.terminal_value),
        KeyValue::from_millions("Discounted Terminal Value", result.discounted_terminal_value),
        KeyValue::from_millions("Enterprise Value", result.enterprise_value),
        KeyValue::from_millions("Equity Value", result.equity_value),
        KeyValue::from_price("Implied Share Price", result.implied_share_price),
    ];

    if let Some(market) = &result.market {
        rows.push(KeyValue::from_price("Current Market Price", market.current_market_price));
        rows.push(KeyValue::from_price("Price Difference", market.price_difference));
        rows.push(KeyValue::new(
            "Percent Difference",
            format!("{:.2}%", market.percent_difference),
        ));
    }

    rows
}

fn print_summary(
    config: &ValuationConfig,
    assumptions: &Assumptions,
    valuation: &Valuation,
    quiet: bool,
) -> Result<()> {
    let result = &valuation.result;

    if !quiet {
        print_header(&format!("{} ({}) DCF Valuation", config.name, config.ticker));
    }
    print_output(&summary_rows(assumptions, result), OutputFormat::Table)?;

    if let Some(comparison) = result.comparison() {
        print_info(&format!(
            "The market price is {comparison} the DCF-implied value."
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use intrinsic_traits::SourceType;

    fn value_args(market_price: Option<f64>, live: bool) -> ValueArgs {
        ValueArgs {
            history: PathBuf::from("fcf.csv"),
            assumptions: AssumptionArgs {
                growth: None,
                wacc: None,
                terminal_growth: None,
                allow_out_of_range: false,
                clamp: false,
            },
            market_price,
            prices: None,
            live,
            quote_url: None,
            ticker: None,
        }
    }

    #[tokio::test]
    async fn test_price_source_selection() {
        let manual = price_source(&value_args(Some(512.0), false)).unwrap();
        assert_eq!(manual.source_type(), SourceType::Manual);
        let quote = manual.latest_price(&Ticker::new("META")).await.unwrap();
        assert_eq!(quote.map(|q| q.price), Some(512.0));

        let live = price_source(&value_args(None, true)).unwrap();
        assert_eq!(live.source_type(), SourceType::Snapshot);

        let none = price_source(&value_args(None, false)).unwrap();
        assert!(none.latest_price(&Ticker::new("META")).await.unwrap().is_none());
    }

    #[test]
    fn test_summary_rows_without_market() {
        let config = ValuationConfig::default();
        let history =
            HistoricalSeries::from_pairs([(2021, 1000.0), (2022, 1100.0), (2023, 1200.0)]).unwrap();
        let valuation = ValuationEngine::new(config.constants())
            .unwrap()
            .compute(&history, &config.defaults, None)
            .unwrap();

        let rows = summary_rows(&config.defaults, &valuation.result);
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[8].value, "$14.32");
        assert_eq!(rows[6].value, "$33,523.91M");
    }
}
