//! Valuation configuration.
//!
//! Holds the company-level constants (net debt, share count, horizon, unit scale), the default
//! assumptions a front end starts from, and the assumption ranges it offers.

use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use intrinsic_core::types::{DEFAULT_FORECAST_HORIZON_YEARS, MILLIONS};
use intrinsic_core::{Assumptions, ValuationConstants};

use crate::bounds::AssumptionBounds;
use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

// =============================================================================
// VALUATION CONFIGURATION
// =============================================================================

/// Configuration for valuing a single company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// Company name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Ticker used to look up a market price.
    #[serde(default = "default_ticker")]
    pub ticker: String,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Explicit forecast horizon in years.
    #[serde(default = "default_horizon")]
    pub forecast_horizon_years: u32,

    /// Net debt in millions (negative for net cash).
    #[serde(default = "default_net_debt")]
    pub net_debt: f64,

    /// Shares outstanding.
    #[serde(default = "default_shares_outstanding")]
    pub shares_outstanding: f64,

    /// Multiplier from the FCF unit to currency units.
    #[serde(default = "default_unit_scale")]
    pub unit_scale: f64,

    /// Starting assumptions.
    #[serde(default = "default_assumptions")]
    pub defaults: Assumptions,

    /// Assumption ranges offered to users.
    #[serde(default)]
    pub bounds: AssumptionBounds,
}

fn default_name() -> String {
    "Meta Platforms".to_string()
}

fn default_ticker() -> String {
    "META".to_string()
}

fn default_horizon() -> u32 {
    DEFAULT_FORECAST_HORIZON_YEARS
}

fn default_net_debt() -> f64 {
    -3000.0
}

fn default_shares_outstanding() -> f64 {
    2_550_000_000.0
}

fn default_unit_scale() -> f64 {
    MILLIONS
}

fn default_assumptions() -> Assumptions {
    Assumptions {
        growth_rate: 0.12,
        discount_rate: 0.08,
        terminal_growth_rate: 0.025,
    }
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self::meta_platforms()
    }
}

impl ValuationConfig {
    /// Creates a configuration with the given name and default settings.
    pub fn new(name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
            description: None,
            forecast_horizon_years: default_horizon(),
            net_debt: 0.0,
            shares_outstanding: 1.0,
            unit_scale: default_unit_scale(),
            defaults: default_assumptions(),
            bounds: AssumptionBounds::default(),
        }
    }

    /// Meta Platforms: $3bn net cash, 2.55bn shares.
    pub fn meta_platforms() -> Self {
        Self {
            description: Some("Meta Platforms DCF valuation".to_string()),
            net_debt: default_net_debt(),
            shares_outstanding: default_shares_outstanding(),
            ..Self::new(default_name(), default_ticker())
        }
    }

    /// Engine constants derived from this configuration.
    pub fn constants(&self) -> ValuationConstants {
        ValuationConstants {
            net_debt: self.net_debt,
            shares_outstanding: self.shares_outstanding,
            ..ValuationConstants::default()
        }
        .with_horizon(self.forecast_horizon_years)
        .with_unit_scale(self.unit_scale)
    }

    // =========================================================================
    // LOADING AND SAVING
    // =========================================================================

    /// Parses a TOML document and validates it.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses a JSON document and validates it.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a configuration file, picking the format from the extension.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        info!("Loading valuation configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Loads `path` if given, otherwise the default configuration.
    pub fn load_or_default(path: Option<impl AsRef<Path>>) -> ConfigResult<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                debug!("No configuration file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Serializes to TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serializes to pretty JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the configuration as TOML.
    pub fn write_toml(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

impl Validate for ValuationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::new("name", "name cannot be empty"));
        }

        if let Err(e) = self.constants().validate() {
            errors.push(ValidationError::with_rule(
                "constants",
                e.to_string(),
                "valid constants",
            ));
        }

        if let Err(e) = self.defaults.validate() {
            errors.push(ValidationError::with_rule(
                "defaults",
                e.to_string(),
                "discount rate > terminal growth",
            ));
        }

        let bound_errors = self.bounds.validate();
        let bounds_ok = bound_errors.is_empty();
        errors.extend(bound_errors);

        if bounds_ok {
            errors.extend(self.bounds.violations(&self.defaults).into_iter().map(|mut e| {
                e.field = format!("defaults.{}", e.field);
                e
            }));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_meta_defaults() {
        let config = ValuationConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.ticker, "META");

        let constants = config.constants();
        assert_eq!(constants.forecast_horizon_years, 5);
        assert_relative_eq!(constants.net_debt, -3000.0);
        assert_relative_eq!(constants.shares_outstanding, 2.55e9);
        assert_relative_eq!(constants.unit_scale, 1e6);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = ValuationConfig::from_toml_str(
            r#"
            name = "Acme"
            ticker = "ACME"
            net_debt = 250.0
            shares_outstanding = 1.0e8
            "#,
        )
        .unwrap();

        assert_eq!(config.name, "Acme");
        assert_relative_eq!(config.net_debt, 250.0);
        assert_eq!(config.forecast_horizon_years, 5);
        assert_relative_eq!(config.defaults.discount_rate, 0.08);
        assert_eq!(config.bounds, AssumptionBounds::default());
    }

    #[test]
    fn test_toml_output_parses_back() {
        let config = ValuationConfig {
            forecast_horizon_years: 7,
            ..ValuationConfig::meta_platforms()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(ValuationConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_defaults_rejected() {
        let err = ValuationConfig::from_toml_str(
            r"
            [defaults]
            growth_rate = 0.10
            discount_rate = 0.03
            terminal_growth_rate = 0.03
            ",
        )
        .unwrap_err();

        // The inverted defaults also fall outside the discount bounds.
        assert!(matches!(err, ConfigError::MultipleValidationErrors(_)));
    }

    #[test]
    fn test_zero_shares_rejected() {
        let config = ValuationConfig {
            shares_outstanding: 0.0,
            ..ValuationConfig::meta_platforms()
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "constants");
    }

    #[test]
    fn test_malformed_toml() {
        let err = ValuationConfig::from_toml_str("net_debt = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));
    }

    #[test]
    fn test_json() {
        let config = ValuationConfig::from_json_str(r#"{"name": "Acme", "shares_outstanding": 5.0}"#)
            .unwrap();
        assert_relative_eq!(config.shares_outstanding, 5.0);
        assert_relative_eq!(config.net_debt, -3000.0);
    }
}
