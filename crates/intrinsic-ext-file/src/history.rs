//! File-based historical FCF sources.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

use intrinsic_core::{FcfObservation, HistoricalSeries};
use intrinsic_traits::error::TraitError;
use intrinsic_traits::history::HistoricalDataSource;
use intrinsic_traits::market_data::SourceType;

// =============================================================================
// CSV HISTORICAL SOURCE
// =============================================================================

/// CSV record for one year of FCF.
#[derive(Debug, Deserialize)]
struct FcfRecord {
    #[serde(rename = "Year", alias = "year")]
    year: i32,
    #[serde(rename = "FCF", alias = "fcf")]
    fcf: f64,
}

/// CSV-based historical FCF source.
///
/// Expects a header row with `Year` and `FCF` columns (FCF in millions). Extra columns are
/// ignored and row order does not matter.
pub struct CsvHistoricalSource {
    file_path: PathBuf,
}

impl CsvHistoricalSource {
    /// Create a new CSV historical source.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Path this source reads from.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read and validate the series.
    pub fn read_series(&self) -> Result<HistoricalSeries, TraitError> {
        if !self.file_path.exists() {
            return Err(TraitError::NotFound(self.file_path.display().to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .map_err(|e| TraitError::IoError(e.to_string()))?;

        let observations = reader
            .deserialize()
            .map(|row| {
                let record: FcfRecord = row.map_err(|e| TraitError::ParseError(e.to_string()))?;
                Ok(FcfObservation::new(record.year, record.fcf))
            })
            .collect::<Result<Vec<_>, TraitError>>()?;

        debug!(
            "Read {} FCF rows from {}",
            observations.len(),
            self.file_path.display()
        );

        Ok(HistoricalSeries::new(observations)?)
    }
}

#[async_trait]
impl HistoricalDataSource for CsvHistoricalSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn load_history(&self) -> Result<HistoricalSeries, TraitError> {
        self.read_series()
    }
}

// =============================================================================
// IN-MEMORY HISTORICAL SOURCE
// =============================================================================

/// Historical source over an already-built series.
pub struct StaticHistoricalSource {
    series: HistoricalSeries,
}

impl StaticHistoricalSource {
    /// Wrap a series.
    pub fn new(series: HistoricalSeries) -> Self {
        Self { series }
    }
}

#[async_trait]
impl HistoricalDataSource for StaticHistoricalSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn load_history(&self) -> Result<HistoricalSeries, TraitError> {
        Ok(self.series.clone())
    }
}
