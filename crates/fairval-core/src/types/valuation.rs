//! DCF valuation inputs.

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_positive, ValuationError, ValuationResult};
use crate::wacc::WaccTable;

/// Scalar financial facts for one company snapshot.
///
/// All currency amounts share one unit (the caller's reporting currency).
/// The discount rate is a fraction derived externally, typically from beta
/// through a [`WaccTable`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    /// Free cash flow of the latest period.
    pub free_cash_flow: f64,
    /// Cash and cash equivalents (including short-term investments).
    pub cash_and_equivalents: f64,
    /// Total debt.
    pub total_debt: f64,
    /// Shares outstanding. Must be positive.
    pub shares_outstanding: f64,
    /// Per-period discount rate. Must exceed -1.
    pub discount_rate: f64,
}

impl ValuationInputs {
    /// Creates a new set of valuation inputs.
    #[must_use]
    pub fn new(
        free_cash_flow: f64,
        cash_and_equivalents: f64,
        total_debt: f64,
        shares_outstanding: f64,
        discount_rate: f64,
    ) -> Self {
        Self {
            free_cash_flow,
            cash_and_equivalents,
            total_debt,
            shares_outstanding,
            discount_rate,
        }
    }

    /// Returns a copy with a different discount rate.
    #[must_use]
    pub fn with_discount_rate(mut self, discount_rate: f64) -> Self {
        self.discount_rate = discount_rate;
        self
    }

    /// Cash and equivalents net of total debt.
    #[must_use]
    pub fn net_cash(&self) -> f64 {
        self.cash_and_equivalents - self.total_debt
    }

    /// Checks the domain invariants required by the discounting algebra.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::Domain` when any amount is non-finite,
    /// `shares_outstanding <= 0`, or `discount_rate <= -1`.
    pub fn validate(&self) -> ValuationResult<()> {
        require_finite("free_cash_flow", self.free_cash_flow)?;
        require_finite("cash_and_equivalents", self.cash_and_equivalents)?;
        require_finite("total_debt", self.total_debt)?;
        require_positive("shares_outstanding", self.shares_outstanding)?;
        require_finite("discount_rate", self.discount_rate)?;
        if self.discount_rate <= -1.0 {
            return Err(ValuationError::domain(
                "discount_rate",
                self.discount_rate,
                "must be greater than -1",
            ));
        }
        Ok(())
    }
}

/// Raw company facts as supplied by a fundamentals provider.
///
/// Carries `beta` rather than a discount rate; the mapping from beta to a
/// discount rate is a caller-side table lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyFundamentals {
    /// Ticker symbol.
    pub ticker: String,
    /// Free cash flow of the latest period.
    pub free_cash_flow: f64,
    /// Cash and cash equivalents.
    pub cash_and_equivalents: f64,
    /// Total debt.
    pub total_debt: f64,
    /// Shares outstanding.
    pub shares_outstanding: f64,
    /// Equity beta.
    pub beta: f64,
}

impl CompanyFundamentals {
    /// Maps these facts to [`ValuationInputs`], deriving the discount rate
    /// from beta through `table`.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::Domain` if beta is not finite.
    pub fn to_valuation_inputs(&self, table: &WaccTable) -> ValuationResult<ValuationInputs> {
        let discount_rate = table.lookup(self.beta)?;
        log::debug!(
            "{}: beta {} maps to discount rate {}",
            self.ticker,
            self.beta,
            discount_rate
        );
        Ok(ValuationInputs::new(
            self.free_cash_flow,
            self.cash_and_equivalents,
            self.total_debt,
            self.shares_outstanding,
            discount_rate,
        ))
    }
}
