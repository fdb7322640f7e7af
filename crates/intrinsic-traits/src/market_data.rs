//! Market price source traits.
//!
//! Fetching a live price is latency-bearing I/O and stays outside the valuation engine. Sources
//! return a [`MarketQuote`]; callers pass `quote.price` into the engine as plain data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TraitError;
use crate::ids::Ticker;

/// Source type for market and historical data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Snapshot/request-response (REST APIs)
    Snapshot,
    /// File-based (CSV, JSON)
    File,
    /// Manual entry
    Manual,
}

/// A single price observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Ticker the price belongs to
    pub ticker: Ticker,
    /// Price per share, in currency units
    pub price: f64,
    /// When the price was observed
    pub as_of: DateTime<Utc>,
    /// Where the price came from
    pub source: String,
}

impl MarketQuote {
    /// Creates a quote observed now.
    pub fn now(ticker: Ticker, price: f64, source: impl Into<String>) -> Self {
        Self {
            ticker,
            price,
            as_of: Utc::now(),
            source: source.into(),
        }
    }
}

/// Trait for current price providers.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Latest known price for `ticker`, or `None` if the source has none.
    async fn latest_price(&self, ticker: &Ticker) -> Result<Option<MarketQuote>, TraitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSource(f64);

    #[async_trait]
    impl PriceSource for FixedSource {
        fn source_type(&self) -> SourceType {
            SourceType::Manual
        }

        async fn latest_price(&self, ticker: &Ticker) -> Result<Option<MarketQuote>, TraitError> {
            Ok(Some(MarketQuote::now(ticker.clone(), self.0, "fixed")))
        }
    }

    #[tokio::test]
    async fn test_trait_object() {
        let source: Box<dyn PriceSource> = Box::new(FixedSource(512.5));
        let quote = source.latest_price(&Ticker::new("meta")).await.unwrap().unwrap();

        assert_eq!(quote.ticker.as_str(), "META");
        assert!((quote.price - 512.5).abs() < f64::EPSILON);
        assert_eq!(source.source_type(), SourceType::Manual);
    }
}
