//! CLI command implementations.

pub mod config;
pub mod forecast;
pub mod value;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use forecast::ForecastArgs;
pub use value::ValueArgs;

use clap::Args;
use tracing::{debug, warn};

use intrinsic_config::ValuationConfig;
use intrinsic_core::Assumptions;

use crate::error::{CliError, CliResult};

/// Rate assumptions shared by the valuation commands.
///
/// Rates are decimals (0.12 for 12%). Unset rates fall back to the configuration defaults.
#[derive(Args, Debug, Clone)]
pub struct AssumptionArgs {
    /// FCF growth rate over the forecast horizon
    #[arg(short, long)]
    pub growth: Option<f64>,

    /// Discount rate (WACC)
    #[arg(short, long)]
    pub wacc: Option<f64>,

    /// Terminal growth rate
    #[arg(short, long)]
    pub terminal_growth: Option<f64>,

    /// Skip the configured assumption ranges
    #[arg(long, conflicts_with = "clamp")]
    pub allow_out_of_range: bool,

    /// Pull out-of-range assumptions to the nearest configured limit
    #[arg(long)]
    pub clamp: bool,
}

impl AssumptionArgs {
    /// Merges the flags over the configured defaults, then clamps or checks the configured
    /// ranges.
    ///
    /// Model constraints (WACC above terminal growth) are left to the engine.
    pub fn resolve(&self, config: &ValuationConfig) -> CliResult<Assumptions> {
        let defaults = config.defaults;
        let mut assumptions = defaults
            .with_growth_rate(self.growth.unwrap_or(defaults.growth_rate))
            .with_discount_rate(self.wacc.unwrap_or(defaults.discount_rate))
            .with_terminal_growth_rate(
                self.terminal_growth
                    .unwrap_or(defaults.terminal_growth_rate),
            );

        if self.clamp {
            let clamped = config.bounds.clamp(&assumptions);
            if clamped != assumptions {
                warn!(?assumptions, ?clamped, "clamped assumptions to configured ranges");
            }
            assumptions = clamped;
        }
        debug!(?assumptions, "resolved assumptions");

        if !self.allow_out_of_range {
            let violations = config.bounds.violations(&assumptions);
            if !violations.is_empty() {
                let message = violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(CliError::OutOfRange(message));
            }
        }

        Ok(assumptions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(growth: Option<f64>, allow: bool) -> AssumptionArgs {
        AssumptionArgs {
            growth,
            wacc: None,
            terminal_growth: None,
            allow_out_of_range: allow,
            clamp: false,
        }
    }

    #[test]
    fn test_defaults_from_config() {
        let a = args(None, false).resolve(&ValuationConfig::default()).unwrap();
        assert_eq!(a, ValuationConfig::default().defaults);
    }

    #[test]
    fn test_override() {
        let a = args(Some(0.15), false).resolve(&ValuationConfig::default()).unwrap();
        assert_eq!(a.growth_rate, 0.15);
        assert_eq!(a.discount_rate, 0.08);
    }

    #[test]
    fn test_out_of_range() {
        let config = ValuationConfig::default();
        assert!(matches!(
            args(Some(0.5), false).resolve(&config),
            Err(CliError::OutOfRange(_))
        ));
        assert!(args(Some(0.5), true).resolve(&config).is_ok());
    }

    #[test]
    fn test_clamp_pulls_into_range() {
        let config = ValuationConfig::default();
        let clamped = AssumptionArgs {
            terminal_growth: Some(0.09),
            clamp: true,
            ..args(Some(0.5), false)
        }
        .resolve(&config)
        .unwrap();

        assert_eq!(clamped.growth_rate, 0.20);
        assert_eq!(clamped.discount_rate, 0.08);
        assert_eq!(clamped.terminal_growth_rate, 0.04);
    }
}
