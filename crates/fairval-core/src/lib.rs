//! # fairval Core
//!
//! Core types, errors, and abstractions for the fairval equity valuation library.
//!
//! This crate provides the plain value objects both valuation engines consume:
//!
//! - **Types**: [`ValuationInputs`], [`GrowthSchedule`], [`Underlying`],
//!   [`FinancialOption`], [`PricingContext`], [`Date`]
//! - **Errors**: [`ValuationError`] covering configuration, domain and
//!   unsupported-style failures
//! - **Discount rates**: [`WaccTable`] mapping beta to a discount rate
//! - **Traits**: data-source capabilities the engines consume but never implement
//!
//! ## Design Philosophy
//!
//! - **Pure data**: value types carry no I/O; data access sits behind traits
//! - **Immutable configuration**: growth schedules and pricing contexts are
//!   built once and read-only thereafter
//! - **Fail fast**: invalid inputs surface as typed errors, never as NaN
//!
//! ## Example
//!
//! ```rust
//! use fairval_core::prelude::*;
//!
//! let underlying = Underlying::new(42.0, 0.2);
//! let call = FinancialOption::european_call(&underlying, 40.0, 0.5);
//! assert_eq!(call.option_type, OptionType::Call);
//!
//! let schedule = GrowthSchedule::from_short_term(0.1246, 0.04).unwrap();
//! assert!((schedule.medium_term() - 0.0623).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod traits;
pub mod types;
pub mod wacc;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ValuationError, ValuationResult};
    pub use crate::traits::{FundamentalsSource, GrowthRateSource, MarketDataSource};
    pub use crate::types::{
        CompanyFundamentals, Date, FinancialOption, GrowthSchedule, GrowthScheduleBuilder,
        OptionStyle, OptionType, PricingContext, Underlying, ValuationInputs,
    };
    pub use crate::wacc::{WaccBand, WaccTable};
}

// Re-export commonly used types at crate root
pub use error::{ValuationError, ValuationResult};
pub use types::{
    Date, FinancialOption, GrowthSchedule, OptionStyle, OptionType, PricingContext, Underlying,
    ValuationInputs,
};
pub use wacc::WaccTable;
