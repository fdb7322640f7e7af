//! Yahoo Finance chart price source.
//!
//! Reads the one-day chart for a ticker and quotes its latest close, falling back to the
//! regular-market price in the chart metadata.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::Deserialize;

use intrinsic_traits::error::TraitError;
use intrinsic_traits::ids::Ticker;
use intrinsic_traits::market_data::{MarketQuote, PriceSource, SourceType};

use crate::client::{HttpClient, HttpResponse, ReqwestHttpClient, DEFAULT_TIMEOUT};

/// Default Yahoo Finance API host.
pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

// =============================================================================
// RESPONSE TYPES
// =============================================================================

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartData,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: Option<ChartIndicators>,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice", default)]
    regular_market_price: Option<f64>,
    #[serde(rename = "regularMarketTime", default)]
    regular_market_time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Latest close and its timestamp, else the metadata price.
fn latest_price(result: &ChartResult) -> Option<(f64, Option<i64>)> {
    let closes = result
        .indicators
        .as_ref()
        .and_then(|i| i.quote.first())
        .map(|q| q.close.as_slice())
        .unwrap_or_default();

    let last_close = closes
        .iter()
        .enumerate()
        .rev()
        .find_map(|(i, close)| close.map(|c| (i, c)));

    match last_close {
        Some((i, close)) => {
            let ts = result
                .timestamp
                .as_ref()
                .and_then(|t| t.get(i).copied())
                .or(result.meta.regular_market_time);
            Some((close, ts))
        }
        None => result
            .meta
            .regular_market_price
            .map(|p| (p, result.meta.regular_market_time)),
    }
}

/// Turns a chart response into a quote. `Ok(None)` when Yahoo has no data for the ticker.
fn parse_chart(ticker: &Ticker, response: &HttpResponse) -> Result<Option<MarketQuote>, TraitError> {
    if response.status == 404 {
        return Ok(None);
    }
    if !response.is_success() {
        return Err(TraitError::SourceNotAvailable(format!(
            "yahoo chart request for {ticker} returned HTTP {}",
            response.status
        )));
    }

    let chart: ChartResponse = serde_json::from_str(&response.body)
        .map_err(|e| TraitError::ParseError(format!("failed to parse yahoo chart: {e}")))?;

    if let Some(error) = chart.chart.error {
        return Err(TraitError::SourceNotAvailable(format!(
            "yahoo chart error {}: {}",
            error.code,
            error.description.unwrap_or_default()
        )));
    }

    let Some((price, ts)) = chart
        .chart
        .result
        .as_deref()
        .and_then(<[ChartResult]>::first)
        .and_then(latest_price)
    else {
        return Ok(None);
    };

    if !price.is_finite() || price <= 0.0 {
        return Err(TraitError::InvalidInput(format!(
            "yahoo price for {ticker} must be positive, got {price}"
        )));
    }

    let as_of = ts
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .unwrap_or_else(Utc::now);

    Ok(Some(MarketQuote {
        ticker: ticker.clone(),
        price,
        as_of,
        source: "yahoo".to_string(),
    }))
}

// =============================================================================
// YAHOO PRICE SOURCE
// =============================================================================

/// Live price source over the Yahoo Finance chart API.
pub struct YahooPriceSource {
    client: Arc<dyn HttpClient>,
    base_url: String,
    timeout: Duration,
}

impl YahooPriceSource {
    /// Creates a source using reqwest against the public API host.
    pub fn new() -> Self {
        Self::with_client(Arc::new(ReqwestHttpClient::new()))
    }

    /// Creates a source over a custom transport.
    pub fn with_client(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            base_url: YAHOO_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the API host.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Chart URL for `ticker`.
    pub fn chart_url(&self, ticker: &Ticker) -> String {
        format!(
            "{}/v8/finance/chart/{}?range=1d&interval=1d",
            self.base_url,
            ticker.as_str()
        )
    }
}

impl Default for YahooPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for YahooPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Snapshot
    }

    async fn latest_price(&self, ticker: &Ticker) -> Result<Option<MarketQuote>, TraitError> {
        let url = self.chart_url(ticker);
        debug!("Fetching {url}");

        let response = self.client.get(&url, self.timeout).await?;
        let quote = parse_chart(ticker, &response)?;
        if quote.is_none() {
            warn!("Yahoo has no price for {ticker}");
        }
        Ok(quote)
    }
}
