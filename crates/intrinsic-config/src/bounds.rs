//! Assumption ranges for interactive front ends.
//!
//! These ranges are presentation constraints (slider limits). The valuation engine does not
//! enforce them; it only enforces the model constraints in
//! [`Assumptions::validate`](intrinsic_core::Assumptions::validate).

use serde::{Deserialize, Serialize};

use intrinsic_core::Assumptions;

use crate::error::{Validate, ValidationError};

/// Inclusive range with a step size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBound {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
    /// Increment between selectable values
    pub step: f64,
}

impl RangeBound {
    /// Creates a new range.
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Returns true if `value` lies within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps `value` into the range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Number of selectable values from `min` to `max`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn steps(&self) -> usize {
        ((self.max - self.min) / self.step).round() as usize + 1
    }

    fn check(&self, field: &str, errors: &mut Vec<ValidationError>) {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            errors.push(ValidationError::new(field, "bounds must be finite"));
            return;
        }
        if self.min > self.max {
            errors.push(ValidationError::with_rule(
                field,
                format!("min {} exceeds max {}", self.min, self.max),
                "min <= max",
            ));
        }
        if self.step <= 0.0 {
            errors.push(ValidationError::with_rule(
                field,
                format!("step {} must be positive", self.step),
                "step > 0",
            ));
        }
    }
}

/// Ranges for the three user-tunable assumptions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssumptionBounds {
    /// FCF growth rate range
    #[serde(default = "default_growth")]
    pub growth: RangeBound,
    /// Discount rate (WACC) range
    #[serde(default = "default_discount")]
    pub discount: RangeBound,
    /// Terminal growth rate range
    #[serde(default = "default_terminal_growth")]
    pub terminal_growth: RangeBound,
}

fn default_growth() -> RangeBound {
    RangeBound::new(0.05, 0.20, 0.01)
}

fn default_discount() -> RangeBound {
    RangeBound::new(0.05, 0.12, 0.005)
}

fn default_terminal_growth() -> RangeBound {
    RangeBound::new(0.01, 0.04, 0.0025)
}

impl Default for AssumptionBounds {
    fn default() -> Self {
        Self {
            growth: default_growth(),
            discount: default_discount(),
            terminal_growth: default_terminal_growth(),
        }
    }
}

impl AssumptionBounds {
    /// Lists every assumption that falls outside its range.
    pub fn violations(&self, assumptions: &Assumptions) -> Vec<ValidationError> {
        [
            ("growth_rate", assumptions.growth_rate, self.growth),
            ("discount_rate", assumptions.discount_rate, self.discount),
            (
                "terminal_growth_rate",
                assumptions.terminal_growth_rate,
                self.terminal_growth,
            ),
        ]
        .into_iter()
        .filter(|(_, value, bound)| !bound.contains(*value))
        .map(|(field, value, bound)| {
            ValidationError::with_rule(
                field,
                format!("{value} is outside [{}, {}]", bound.min, bound.max),
                "within bounds",
            )
        })
        .collect()
    }

    /// Clamps every assumption into its range.
    pub fn clamp(&self, assumptions: &Assumptions) -> Assumptions {
        Assumptions {
            growth_rate: self.growth.clamp(assumptions.growth_rate),
            discount_rate: self.discount.clamp(assumptions.discount_rate),
            terminal_growth_rate: self.terminal_growth.clamp(assumptions.terminal_growth_rate),
        }
    }
}

impl Validate for AssumptionBounds {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.growth.check("bounds.growth", &mut errors);
        self.discount.check("bounds.discount", &mut errors);
        self.terminal_growth.check("bounds.terminal_growth", &mut errors);
        errors
    }
}
