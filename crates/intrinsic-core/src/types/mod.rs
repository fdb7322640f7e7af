//! Domain types for DCF valuation.

mod assumptions;
mod comparison;
mod constants;
mod history;

pub use assumptions::Assumptions;
pub use comparison::Comparison;
pub use constants::{ValuationConstants, DEFAULT_FORECAST_HORIZON_YEARS, MILLIONS};
pub use history::{FcfObservation, HistoricalSeries};
