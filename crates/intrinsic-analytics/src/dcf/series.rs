//! Chart-ready FCF series.
//!
//! Joins the historical observations and the forecast into one year-ordered list tagged by
//! origin, which is what a "historical vs forecasted FCF" chart plots.

use serde::{Deserialize, Serialize};
use std::fmt;

use intrinsic_core::HistoricalSeries;

use super::forecast::ForecastPoint;

/// Origin of a chart point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    /// Reported FCF
    Historical,
    /// Projected FCF
    Forecast,
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeriesKind::Historical => "Historical",
            SeriesKind::Forecast => "Forecast",
        };
        write!(f, "{name}")
    }
}

/// A single plotted point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Year
    pub year: i32,
    /// FCF in millions
    pub fcf: f64,
    /// Historical or forecast
    pub kind: SeriesKind,
    /// Discount factor (forecast points only)
    pub discount_factor: Option<f64>,
    /// Discounted FCF (forecast points only)
    pub discounted_fcf: Option<f64>,
}

/// Historical points followed by forecast points, ascending by year.
pub fn chart_series(history: &HistoricalSeries, forecast: &[ForecastPoint]) -> Vec<SeriesPoint> {
    let historical = history.iter().map(|o| SeriesPoint {
        year: o.year,
        fcf: o.fcf,
        kind: SeriesKind::Historical,
        discount_factor: None,
        discounted_fcf: None,
    });

    let projected = forecast.iter().map(|p| SeriesPoint {
        year: p.year,
        fcf: p.fcf,
        kind: SeriesKind::Forecast,
        discount_factor: Some(p.discount_factor),
        discounted_fcf: Some(p.discounted_fcf),
    });

    historical.chain(projected).collect()
}
