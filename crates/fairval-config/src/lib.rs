//! fairval Configuration Layer
//!
//! This crate provides the settings the fairval engines are built from.
//!
//! # Features
//!
//! - **DCF Configuration**: Long-term growth and the medium-term growth ratio
//!   used to turn a single short-term estimate into a full schedule
//! - **Options Configuration**: Risk-free rate for Black-Scholes pricing
//! - **WACC Table**: Beta bands mapping companies to discount rates
//! - **Validation**: Every loaded configuration is checked before use
//!
//! # Example
//!
//! ```rust
//! use fairval_config::{Validate, ValuationConfig};
//!
//! let config = ValuationConfig::from_toml_str(
//!     r#"
//!     [dcf]
//!     long_term_growth = 0.035
//!
//!     [options]
//!     risk_free_rate = 0.045
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.is_valid());
//! assert_eq!(config.dcf.medium_term_ratio, 0.5);
//!
//! let schedule = config.dcf.schedule_for(0.12).unwrap();
//! assert!((schedule.medium_term() - 0.06).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod valuation;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use valuation::{DcfConfig, OptionsConfig, ValuationConfig};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::valuation::{DcfConfig, OptionsConfig, ValuationConfig};
}
