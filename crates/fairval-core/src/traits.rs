//! Data-source traits.
//!
//! The valuation engines consume plain numbers. Fetching those numbers from a
//! provider, a database or a file is the job of implementations of these
//! traits, which live outside the engines:
//!
//! - [`FundamentalsSource`]: DCF inputs for a ticker as of a date
//! - [`GrowthRateSource`]: growth schedule for a ticker
//! - [`MarketDataSource`]: spot, volatility and dividend yield for a ticker
//!
//! Test doubles are ordinary structs holding constructed value objects.

use crate::error::ValuationResult;
use crate::types::{Date, GrowthSchedule, Underlying, ValuationInputs};

/// Supplies DCF inputs for a company.
pub trait FundamentalsSource: Send + Sync {
    /// Returns the valuation inputs for `ticker` as of `as_of`.
    ///
    /// Implementations are responsible for mapping beta to a discount rate.
    fn fetch_fundamentals(&self, ticker: &str, as_of: Date) -> ValuationResult<ValuationInputs>;

    /// Returns the source name for logging and error messages.
    fn name(&self) -> &str;
}

/// Supplies free cash flow growth assumptions for a company.
pub trait GrowthRateSource: Send + Sync {
    /// Returns the growth schedule for `ticker` as of `as_of`.
    fn growth_schedule(&self, ticker: &str, as_of: Date) -> ValuationResult<GrowthSchedule>;
}

/// Supplies the market state of an equity underlying.
pub trait MarketDataSource: Send + Sync {
    /// Returns spot, volatility and dividend yield for `ticker` as of `as_of`.
    fn fetch_underlying(&self, ticker: &str, as_of: Date) -> ValuationResult<Underlying>;
}
