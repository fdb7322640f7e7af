//! Historical free-cash-flow series.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IntrinsicError, IntrinsicResult};

/// A single year of reported free cash flow.
///
/// `fcf` is expressed in the series' stated unit (millions of currency units).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FcfObservation {
    /// Fiscal year
    pub year: i32,
    /// Free cash flow for the year, in millions
    pub fcf: f64,
}

impl FcfObservation {
    /// Creates a new observation.
    #[must_use]
    pub fn new(year: i32, fcf: f64) -> Self {
        Self { year, fcf }
    }
}

impl fmt::Display for FcfObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}M", self.year, self.fcf)
    }
}

/// Historical FCF observations, sorted ascending by year.
///
/// Construction sorts the input and rejects empty series, duplicate years and non-finite
/// values, so [`HistoricalSeries::latest`] is always the most recent year rather than whatever
/// row happened to be supplied last.
///
/// # Example
///
/// ```rust
/// use intrinsic_core::types::{FcfObservation, HistoricalSeries};
///
/// let series = HistoricalSeries::new(vec![
///     FcfObservation::new(2023, 1200.0),
///     FcfObservation::new(2021, 1000.0),
/// ])
/// .unwrap();
///
/// assert_eq!(series.first().year, 2021);
/// assert_eq!(series.latest().fcf, 1200.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FcfObservation>", into = "Vec<FcfObservation>")]
pub struct HistoricalSeries {
    observations: Vec<FcfObservation>,
}

impl HistoricalSeries {
    /// Builds a validated series from observations in any order.
    pub fn new(mut observations: Vec<FcfObservation>) -> IntrinsicResult<Self> {
        if observations.is_empty() {
            return Err(IntrinsicError::input("historical series is empty"));
        }

        if let Some(bad) = observations.iter().find(|o| !o.fcf.is_finite()) {
            return Err(IntrinsicError::input(format!(
                "free cash flow for {} is not finite ({})",
                bad.year, bad.fcf
            )));
        }

        observations.sort_by_key(|o| o.year);

        if let Some(pair) = observations.windows(2).find(|w| w[0].year == w[1].year) {
            return Err(IntrinsicError::input(format!(
                "duplicate year {} in historical series",
                pair[0].year
            )));
        }

        Ok(Self { observations })
    }

    /// Builds a series from `(year, fcf)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (i32, f64)>) -> IntrinsicResult<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(year, fcf)| FcfObservation::new(year, fcf))
                .collect(),
        )
    }

    /// The most recent observation by year.
    pub fn latest(&self) -> &FcfObservation {
        // non-empty by construction
        &self.observations[self.observations.len() - 1]
    }

    /// The earliest observation by year.
    pub fn first(&self) -> &FcfObservation {
        &self.observations[0]
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations in ascending year order.
    pub fn observations(&self) -> &[FcfObservation] {
        &self.observations
    }

    /// Iterates observations in ascending year order.
    pub fn iter(&self) -> impl Iterator<Item = &FcfObservation> {
        self.observations.iter()
    }
}

impl TryFrom<Vec<FcfObservation>> for HistoricalSeries {
    type Error = IntrinsicError;

    fn try_from(observations: Vec<FcfObservation>) -> Result<Self, Self::Error> {
        Self::new(observations)
    }
}

impl From<HistoricalSeries> for Vec<FcfObservation> {
    fn from(series: HistoricalSeries) -> Self {
        series.observations
    }
}

impl<'a> IntoIterator for &'a HistoricalSeries {
    type Item = &'a FcfObservation;
    type IntoIter = std::slice::Iter<'a, FcfObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
