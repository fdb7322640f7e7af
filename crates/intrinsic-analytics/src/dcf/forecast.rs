//! FCF projection over the explicit forecast horizon.

use serde::{Deserialize, Serialize};

use intrinsic_core::{FcfObservation, IntrinsicError, IntrinsicResult};

/// One projected year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Calendar year (latest historical year + step)
    pub year: i32,
    /// Projected free cash flow, in millions
    pub fcf: f64,
    /// Discount factor for the step, in (0, 1]
    pub discount_factor: f64,
    /// `fcf × discount_factor`
    pub discounted_fcf: f64,
}

/// Annual-compounding discount factor `1 / (1 + rate)^periods`.
///
/// # Example
///
/// ```rust
/// use intrinsic_analytics::dcf::discount_factor;
///
/// assert_eq!(discount_factor(0.08, 0), 1.0);
/// assert!((discount_factor(0.08, 1) - 1.0 / 1.08).abs() < 1e-15);
/// ```
pub fn discount_factor(rate: f64, periods: u32) -> f64 {
    1.0 / (1.0 + rate).powf(f64::from(periods))
}

/// Projects `horizon` years of FCF from `anchor` at a constant growth rate and discounts each
/// year at `discount_rate`.
///
/// Step `i` (1-based) is `anchor.fcf × (1 + growth_rate)^i`, dated `anchor.year + i`.
pub fn project_cash_flows(
    anchor: &FcfObservation,
    growth_rate: f64,
    discount_rate: f64,
    horizon: u32,
) -> IntrinsicResult<Vec<ForecastPoint>> {
    (1..=horizon)
        .map(|step| {
            let offset = i32::try_from(step)
                .map_err(|_| IntrinsicError::input(format!("forecast step {step} out of range")))?;
            let year = anchor.year.checked_add(offset).ok_or_else(|| {
                IntrinsicError::input(format!("forecast year {} + {step} overflows", anchor.year))
            })?;

            let fcf = anchor.fcf * (1.0 + growth_rate).powf(f64::from(step));
            let df = discount_factor(discount_rate, step);

            Ok(ForecastPoint {
                year,
                fcf,
                discount_factor: df,
                discounted_fcf: fcf * df,
            })
        })
        .collect()
}
