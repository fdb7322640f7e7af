//! Market price versus implied value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the market price sits relative to the DCF-implied price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// Market price exceeds the implied price
    Above,
    /// Market price is at or below the implied price
    Below,
}

impl Comparison {
    /// Classifies a price difference (market minus implied).
    ///
    /// Strictly positive differences are `Above`; zero falls to `Below`.
    pub fn from_difference(price_difference: f64) -> Self {
        if price_difference > 0.0 {
            Comparison::Above
        } else {
            Comparison::Below
        }
    }

    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Above => "above",
            Comparison::Below => "below",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
