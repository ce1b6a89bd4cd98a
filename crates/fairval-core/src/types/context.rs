//! Option pricing context.

use serde::{Deserialize, Serialize};

use crate::types::Date;

/// Market context an option pricing engine is configured with.
///
/// The pricing date is informational: formulas read time to expiry from the
/// option itself. The risk-free rate is continuously compounded and may be
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingContext {
    /// Calendar anchor of the pricing run.
    pub pricing_date: Date,
    /// Continuously compounded risk-free rate r.
    pub risk_free_rate: f64,
}

impl PricingContext {
    /// Creates a new pricing context.
    #[must_use]
    pub fn new(pricing_date: Date, risk_free_rate: f64) -> Self {
        Self {
            pricing_date,
            risk_free_rate,
        }
    }

    /// Creates a context anchored at today's date.
    #[must_use]
    pub fn today(risk_free_rate: f64) -> Self {
        Self::new(Date::today(), risk_free_rate)
    }

    /// Continuously compounded discount factor e^(−rT).
    #[must_use]
    pub fn discount_factor(&self, time: f64) -> f64 {
        (-self.risk_free_rate * time).exp()
    }
}
