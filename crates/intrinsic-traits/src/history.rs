//! Historical free cash flow sources.

use async_trait::async_trait;

use intrinsic_core::HistoricalSeries;

use crate::error::TraitError;
use crate::market_data::SourceType;

/// Trait for providers of a company's historical FCF.
#[async_trait]
pub trait HistoricalDataSource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Loads the full series, validated and sorted by year.
    async fn load_history(&self) -> Result<HistoricalSeries, TraitError>;
}
