//! User-chosen valuation assumptions.

use serde::{Deserialize, Serialize};

use crate::error::{IntrinsicError, IntrinsicResult};

/// Growth and discounting assumptions for a DCF valuation.
///
/// All rates are decimals (0.08 for 8%). The Gordon-growth terminal value requires
/// `discount_rate > terminal_growth_rate`; [`Assumptions::validate`] enforces this along with
/// the other model constraints, independent of any range a front end applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Annual FCF growth over the explicit forecast horizon, in (-1, inf)
    pub growth_rate: f64,
    /// Discount rate (WACC), > 0
    pub discount_rate: f64,
    /// Perpetual growth beyond the horizon
    pub terminal_growth_rate: f64,
}

impl Assumptions {
    /// Creates validated assumptions.
    pub fn new(
        growth_rate: f64,
        discount_rate: f64,
        terminal_growth_rate: f64,
    ) -> IntrinsicResult<Self> {
        let assumptions = Self {
            growth_rate,
            discount_rate,
            terminal_growth_rate,
        };
        assumptions.validate()?;
        Ok(assumptions)
    }

    /// Checks the model constraints.
    pub fn validate(&self) -> IntrinsicResult<()> {
        for (name, value) in [
            ("growth rate", self.growth_rate),
            ("discount rate", self.discount_rate),
            ("terminal growth rate", self.terminal_growth_rate),
        ] {
            if !value.is_finite() {
                return Err(IntrinsicError::domain(format!("{name} is not finite ({value})")));
            }
        }

        if self.growth_rate <= -1.0 {
            return Err(IntrinsicError::domain(format!(
                "growth rate {} must be greater than -1",
                self.growth_rate
            )));
        }

        if self.discount_rate <= 0.0 {
            return Err(IntrinsicError::domain(format!(
                "discount rate {} must be positive",
                self.discount_rate
            )));
        }

        if self.discount_rate <= self.terminal_growth_rate {
            return Err(IntrinsicError::domain(format!(
                "discount rate {} must exceed terminal growth rate {}",
                self.discount_rate, self.terminal_growth_rate
            )));
        }

        Ok(())
    }

    /// Returns a copy with a different growth rate (unvalidated).
    pub fn with_growth_rate(mut self, growth_rate: f64) -> Self {
        self.growth_rate = growth_rate;
        self
    }

    /// Returns a copy with a different discount rate (unvalidated).
    pub fn with_discount_rate(mut self, discount_rate: f64) -> Self {
        self.discount_rate = discount_rate;
        self
    }

    /// Returns a copy with a different terminal growth rate (unvalidated).
    pub fn with_terminal_growth_rate(mut self, terminal_growth_rate: f64) -> Self {
        self.terminal_growth_rate = terminal_growth_rate;
        self
    }
}
