//! Gordon-growth terminal value.

use intrinsic_core::{IntrinsicError, IntrinsicResult};

/// Perpetuity value at the end of the horizon of a cash flow growing at `terminal_growth_rate`.
///
/// ```text
/// TV = final_fcf × (1 + g_t) / (r − g_t)
/// ```
///
/// Fails with a domain error when `discount_rate <= terminal_growth_rate`: the perpetuity is
/// then divergent (or divides by zero) rather than merely large.
pub fn gordon_growth_terminal_value(
    final_fcf: f64,
    discount_rate: f64,
    terminal_growth_rate: f64,
) -> IntrinsicResult<f64> {
    if discount_rate <= terminal_growth_rate {
        return Err(IntrinsicError::domain(format!(
            "discount rate {discount_rate} must exceed terminal growth rate {terminal_growth_rate}"
        )));
    }

    let value = final_fcf * (1.0 + terminal_growth_rate) / (discount_rate - terminal_growth_rate);
    if !value.is_finite() {
        return Err(IntrinsicError::domain(format!(
            "terminal value is not finite ({value})"
        )));
    }
    Ok(value)
}

/// Present value of a terminal value received at the end of year `horizon`.
pub fn discounted_terminal_value(terminal_value: f64, discount_rate: f64, horizon: u32) -> f64 {
    terminal_value / (1.0 + discount_rate).powf(f64::from(horizon))
}
