//! Domain types for equity valuation.
//!
//! This module provides the value objects both engines consume:
//!
//! - [`ValuationInputs`]: Per-share DCF facts for one company snapshot
//! - [`CompanyFundamentals`]: Raw provider facts, including beta
//! - [`GrowthSchedule`]: Three-regime free cash flow growth rates
//! - [`Underlying`]: Spot, volatility and dividend yield of an equity
//! - [`FinancialOption`]: A call or put on an [`Underlying`]
//! - [`PricingContext`]: Pricing date and risk-free rate
//! - [`Date`]: Calendar date

mod context;
mod date;
mod growth;
mod option;
mod valuation;

pub use context::PricingContext;
pub use date::Date;
pub use growth::{GrowthSchedule, GrowthScheduleBuilder};
pub use option::{FinancialOption, OptionStyle, OptionType, Underlying};
pub use valuation::{CompanyFundamentals, ValuationInputs};
