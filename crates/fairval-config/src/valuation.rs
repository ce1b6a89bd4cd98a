//! Valuation configuration types.
//!
//! This module defines the settings both engines are built from: the growth
//! convention for DCF schedules, the risk-free rate for option pricing, and
//! the beta-to-discount-rate table.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use fairval_core::{Date, GrowthSchedule, PricingContext, ValuationResult, WaccTable};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

// =============================================================================
// DCF CONFIGURATION
// =============================================================================

/// Growth convention for DCF schedules.
///
/// Only the short-term rate varies per company; the medium-term rate is a
/// fixed fraction of it and the long-term rate is a flat terminal growth
/// assumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DcfConfig {
    /// Growth rate applied to years 11 to 20.
    #[serde(default = "default_long_term_growth")]
    pub long_term_growth: f64,

    /// Medium-term growth as a fraction of short-term growth.
    #[serde(default = "default_medium_term_ratio")]
    pub medium_term_ratio: f64,
}

fn default_long_term_growth() -> f64 {
    0.04
}

fn default_medium_term_ratio() -> f64 {
    0.5
}

impl Default for DcfConfig {
    fn default() -> Self {
        Self {
            long_term_growth: default_long_term_growth(),
            medium_term_ratio: default_medium_term_ratio(),
        }
    }
}

impl DcfConfig {
    /// Builds the growth schedule for a company with the given short-term
    /// growth rate.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::Configuration` if any resulting rate is not
    /// finite.
    pub fn schedule_for(&self, short_term: f64) -> ValuationResult<GrowthSchedule> {
        GrowthSchedule::builder()
            .short_term(short_term)
            .medium_term(short_term * self.medium_term_ratio)
            .long_term(self.long_term_growth)
            .build()
    }
}

impl Validate for DcfConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.long_term_growth.is_finite() || self.long_term_growth <= -1.0 {
            errors.push(ValidationError::with_rule(
                "dcf.long_term_growth",
                format!(
                    "Long-term growth {} must be finite and greater than -1",
                    self.long_term_growth
                ),
                "valid_growth",
            ));
        }

        if !(0.0..=1.0).contains(&self.medium_term_ratio) {
            errors.push(ValidationError::with_rule(
                "dcf.medium_term_ratio",
                format!(
                    "Medium-term ratio {} must be between 0 and 1",
                    self.medium_term_ratio
                ),
                "valid_ratio",
            ));
        }

        errors
    }
}

// =============================================================================
// OPTIONS CONFIGURATION
// =============================================================================

/// Option pricing settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Continuously compounded risk-free rate.
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
}

fn default_risk_free_rate() -> f64 {
    0.05
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
        }
    }
}

impl OptionsConfig {
    /// Pricing context for `pricing_date` at the configured rate.
    #[must_use]
    pub fn pricing_context(&self, pricing_date: Date) -> PricingContext {
        PricingContext::new(pricing_date, self.risk_free_rate)
    }
}

impl Validate for OptionsConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.risk_free_rate.is_finite() || self.risk_free_rate.abs() >= 1.0 {
            errors.push(ValidationError::with_rule(
                "options.risk_free_rate",
                format!(
                    "Risk-free rate {} must be finite and between -1 and 1",
                    self.risk_free_rate
                ),
                "valid_rate",
            ));
        }

        errors
    }
}

// =============================================================================
// TOP-LEVEL CONFIGURATION
// =============================================================================

/// Complete valuation configuration.
///
/// Every section is optional in a file; missing sections and fields take
/// their defaults.
///
/// ```toml
/// [dcf]
/// long_term_growth = 0.04
/// medium_term_ratio = 0.5
///
/// [options]
/// risk_free_rate = 0.05
///
/// [wacc]
/// ceiling_rate = 0.085
///
/// [[wacc.bands]]
/// beta_below = 0.8
/// rate = 0.05
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// DCF growth convention.
    #[serde(default)]
    pub dcf: DcfConfig,

    /// Option pricing settings.
    #[serde(default)]
    pub options: OptionsConfig,

    /// Beta to discount rate table.
    #[serde(default)]
    pub wacc: WaccTable,
}

impl ValuationConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    ///
    /// Files with a `.json` extension are read as JSON, anything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path)?;
        log::debug!("loading valuation config from {}", path.display());

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> ConfigResult<Self> {
        match Self::from_file(path) {
            Err(ConfigError::NotFound { path }) => {
                log::debug!("no config at {path}, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Serializes to a TOML document.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

impl Validate for ValuationConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.dcf.validate();
        errors.extend(self.options.validate());

        if let Err(err) = self.wacc.validate() {
            errors.push(ValidationError::with_rule(
                "wacc",
                err.to_string(),
                "valid_wacc_table",
            ));
        }

        errors
    }
}
