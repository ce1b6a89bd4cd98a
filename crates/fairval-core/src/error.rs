//! Error types for the fairval library.
//!
//! Engines fail fast at the point of invalid input: no retries, no clamping,
//! no default substitution. A failed call returns no partial result.

use thiserror::Error;

use crate::types::OptionStyle;

/// A specialized Result type for valuation operations.
pub type ValuationResult<T> = Result<T, ValuationError>;

/// The main error type for valuation operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValuationError {
    /// A required rate or parameter was missing before a computation was attempted.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// Description of the missing or invalid setting.
        reason: String,
    },

    /// A mathematically invalid input (e.g. non-positive volatility).
    #[error("Domain error: {parameter} = {value} ({reason})")]
    Domain {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The value that was supplied.
        value: f64,
        /// Why the value is rejected.
        reason: String,
    },

    /// The option style has no pricing implementation.
    #[error("Unsupported option style: {style} options are not implemented")]
    UnsupportedStyle {
        /// The rejected style.
        style: OptionStyle,
    },

    /// An option type tag other than call or put.
    #[error("Invalid option type: '{0}' (expected 'call' or 'put')")]
    InvalidOptionType(String),

    /// An option style tag other than european or american.
    #[error("Invalid option style: '{0}' (expected 'european' or 'american')")]
    InvalidOptionStyle(String),

    /// Error parsing or constructing a date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// An external data source could not supply the requested facts.
    #[error("Data source '{source_name}' failed: {reason}")]
    DataSource {
        /// Name of the source that failed.
        source_name: String,
        /// Description of the failure.
        reason: String,
    },
}

impl ValuationError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Creates a domain error for the named parameter.
    #[must_use]
    pub fn domain(parameter: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::Domain {
            parameter,
            value,
            reason: reason.into(),
        }
    }

    /// Creates a data source error.
    #[must_use]
    pub fn data_source(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataSource {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors caused by mathematically invalid input.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }
}

/// Rejects NaN and infinite values for the named parameter.
pub fn require_finite(parameter: &'static str, value: f64) -> ValuationResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValuationError::domain(parameter, value, "must be finite"))
    }
}

/// Rejects values that are not strictly positive.
pub fn require_positive(parameter: &'static str, value: f64) -> ValuationResult<f64> {
    require_finite(parameter, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValuationError::domain(parameter, value, "must be positive"))
    }
}
