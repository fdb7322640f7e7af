//! File-based and manual price sources.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use log::info;
use serde::Deserialize;

use intrinsic_traits::error::TraitError;
use intrinsic_traits::ids::Ticker;
use intrinsic_traits::market_data::{MarketQuote, PriceSource, SourceType};

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

/// CSV record for prices.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    ticker: String,
    price: f64,
    as_of: Option<DateTime<Utc>>,
}

/// CSV-based price source for offline runs.
///
/// Columns: `ticker,price[,as_of]` with `as_of` in RFC 3339. When a ticker appears more than
/// once the row with the latest `as_of` wins; rows without `as_of` are stamped with load time.
pub struct CsvPriceSource {
    file_path: PathBuf,
    quotes: DashMap<Ticker, MarketQuote>,
}

impl CsvPriceSource {
    /// Create a new CSV price source.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            quotes: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload prices from file.
    ///
    /// The cache is replaced only after the whole file parses; on error the previous prices
    /// stay in place.
    pub fn reload(&self) -> Result<(), TraitError> {
        let latest = self.read_quotes()?;

        self.quotes.clear();
        for (ticker, quote) in latest {
            self.quotes.insert(ticker, quote);
        }

        info!(
            "Loaded prices for {} tickers from {}",
            self.quotes.len(),
            self.file_path.display()
        );
        Ok(())
    }

    /// Parses the file into the latest quote per ticker.
    fn read_quotes(&self) -> Result<HashMap<Ticker, MarketQuote>, TraitError> {
        let mut latest: HashMap<Ticker, MarketQuote> = HashMap::new();

        if !self.file_path.exists() {
            return Ok(latest); // Empty source
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .map_err(|e| TraitError::IoError(e.to_string()))?;

        let loaded_at = Utc::now();
        for result in reader.deserialize() {
            let record: PriceRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;

            if !record.price.is_finite() || record.price <= 0.0 {
                return Err(TraitError::InvalidInput(format!(
                    "price for {} must be positive, got {}",
                    record.ticker, record.price
                )));
            }

            let quote = MarketQuote {
                ticker: Ticker::new(&record.ticker),
                price: record.price,
                as_of: record.as_of.unwrap_or(loaded_at),
                source: "file".to_string(),
            };

            let newer = latest
                .get(&quote.ticker)
                .map_or(true, |existing| quote.as_of >= existing.as_of);
            if newer {
                latest.insert(quote.ticker.clone(), quote);
            }
        }

        Ok(latest)
    }

    /// Number of tickers with a price.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// True when no prices are loaded.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[async_trait]
impl PriceSource for CsvPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn latest_price(&self, ticker: &Ticker) -> Result<Option<MarketQuote>, TraitError> {
        Ok(self.quotes.get(ticker).map(|q| q.clone()))
    }
}

// =============================================================================
// STATIC PRICE SOURCE
// =============================================================================

/// Manually entered price, returned for any ticker.
pub struct StaticPriceSource {
    price: f64,
}

impl StaticPriceSource {
    /// Create a source that always quotes `price`.
    pub fn new(price: f64) -> Self {
        Self { price }
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn latest_price(&self, ticker: &Ticker) -> Result<Option<MarketQuote>, TraitError> {
        Ok(Some(MarketQuote::now(ticker.clone(), self.price, "manual")))
    }
}

// =============================================================================
// EMPTY IMPLEMENTATIONS
// =============================================================================

/// Empty price source: no market comparison.
pub struct EmptyPriceSource;

#[async_trait]
impl PriceSource for EmptyPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn latest_price(&self, _ticker: &Ticker) -> Result<Option<MarketQuote>, TraitError> {
        Ok(None)
    }
}
