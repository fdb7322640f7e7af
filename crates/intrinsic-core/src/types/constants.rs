//! Fixed business parameters of a valuation.

use serde::{Deserialize, Serialize};

use crate::error::{IntrinsicError, IntrinsicResult};

/// Number of explicitly forecast years.
pub const DEFAULT_FORECAST_HORIZON_YEARS: u32 = 5;

/// Scale from the series unit (millions) to currency units.
pub const MILLIONS: f64 = 1_000_000.0;

/// Company-level constants that feed the equity bridge.
///
/// `net_debt` is in the same unit as the FCF series (millions) and may be negative for a
/// net-cash company, which raises equity value above enterprise value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationConstants {
    /// Explicit forecast horizon in years (>= 1)
    pub forecast_horizon_years: u32,
    /// Net debt in millions; negative means net cash
    pub net_debt: f64,
    /// Diluted shares outstanding (> 0)
    pub shares_outstanding: f64,
    /// Multiplier from series unit to currency units
    pub unit_scale: f64,
}

impl Default for ValuationConstants {
    fn default() -> Self {
        Self {
            forecast_horizon_years: DEFAULT_FORECAST_HORIZON_YEARS,
            net_debt: 0.0,
            shares_outstanding: 1.0,
            unit_scale: MILLIONS,
        }
    }
}

impl ValuationConstants {
    /// Creates constants with the default horizon and a millions unit scale.
    pub fn new(net_debt: f64, shares_outstanding: f64) -> IntrinsicResult<Self> {
        let constants = Self {
            net_debt,
            shares_outstanding,
            ..Self::default()
        };
        constants.validate()?;
        Ok(constants)
    }

    /// Sets the forecast horizon.
    pub fn with_horizon(mut self, years: u32) -> Self {
        self.forecast_horizon_years = years;
        self
    }

    /// Sets the unit scale.
    pub fn with_unit_scale(mut self, unit_scale: f64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    /// Checks that the constants can produce a finite share price.
    pub fn validate(&self) -> IntrinsicResult<()> {
        if self.forecast_horizon_years == 0 {
            return Err(IntrinsicError::input("forecast horizon must be at least one year"));
        }
        if !self.net_debt.is_finite() {
            return Err(IntrinsicError::input(format!(
                "net debt is not finite ({})",
                self.net_debt
            )));
        }
        if !self.shares_outstanding.is_finite() || self.shares_outstanding <= 0.0 {
            return Err(IntrinsicError::input(format!(
                "shares outstanding must be positive, got {}",
                self.shares_outstanding
            )));
        }
        if !self.unit_scale.is_finite() || self.unit_scale <= 0.0 {
            return Err(IntrinsicError::input(format!(
                "unit scale must be positive, got {}",
                self.unit_scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_cash_allowed() {
        let c = ValuationConstants::new(-3000.0, 2_550_000_000.0).unwrap();
        assert_eq!(c.forecast_horizon_years, 5);
        assert_eq!(c.unit_scale, 1_000_000.0);
    }

    #[test]
    fn test_zero_shares_rejected() {
        assert!(ValuationConstants::new(0.0, 0.0).unwrap_err().is_input());
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let c = ValuationConstants::new(0.0, 1.0).unwrap().with_horizon(0);
        assert!(c.validate().is_err());
    }
}
