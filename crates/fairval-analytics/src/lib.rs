//! # fairval Analytics
//!
//! Valuation engines for equities and equity options.
//!
//! - **DCF**: Three-regime free cash flow projection discounted to a
//!   per-share fair value ([`DcfEngine`])
//! - **Options**: Black-Scholes pricing of European options, the five
//!   standard Greeks, and put-call parity checks ([`BlackScholesEngine`])
//! - **Batch**: Independent valuation of many securities, parallel with the
//!   `parallel` feature
//!
//! ## Architecture
//!
//! `fairval-analytics` depends on `fairval-core` for value objects and the
//! error type. Engines hold only read-only configuration (a growth schedule
//! or a pricing context) and never mutate their inputs, so any number of
//! valuations may run concurrently on shared engines.
//!
//! ## Usage
//!
//! ```rust
//! use fairval_analytics::prelude::*;
//!
//! // Equity fair value
//! let inputs = ValuationInputs::new(71_706e6, 93_025e6, 112_723e6, 17_250e6, 0.08);
//! let schedule = GrowthSchedule::from_short_term(0.1246, 0.04)?;
//! let value = DcfEngine::new(schedule).fair_value(&inputs)?;
//! assert!((value - 84.88).abs() < 1e-2);
//!
//! // Option price and Greeks
//! let stock = Underlying::new(42.0, 0.2);
//! let call = FinancialOption::european_call(&stock, 40.0, 0.5);
//! let engine = BlackScholesEngine::new(PricingContext::new(Date::from_ymd(2023, 11, 1)?, 0.1));
//! let greeks = engine.greeks(&call)?;
//! assert!((greeks.price - 4.7594).abs() < 1e-4);
//! # Ok::<(), fairval_core::ValuationError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod batch;
pub mod dcf;
pub mod options;

pub use dcf::{fair_value, DcfEngine, DcfValuation, GrowthRegime, ProjectedCashFlow};
pub use options::{norm_cdf, norm_pdf, BlackScholesEngine, Greeks};

/// Prelude module for convenient imports.
///
/// ```rust
/// use fairval_analytics::prelude::*;
/// ```
pub mod prelude {
    pub use fairval_core::prelude::*;

    // DCF
    pub use crate::dcf::{fair_value, DcfEngine, DcfValuation, GrowthRegime, ProjectedCashFlow};

    // Options
    pub use crate::options::{BlackScholesEngine, Greeks};

    // Batch
    pub use crate::batch::{fair_values, greeks_for, DcfRequest};
}
