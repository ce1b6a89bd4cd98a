//! Option price sensitivities.

use serde::{Deserialize, Serialize};

/// Price and first-order sensitivities of an option.
///
/// Values are in raw model units: theta is the annualized derivative with
/// respect to calendar time (negative for a typical long option), vega is per
/// unit of volatility, rho per unit of rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Model price.
    pub price: f64,
    /// ∂V/∂S.
    pub delta: f64,
    /// ∂²V/∂S².
    pub gamma: f64,
    /// ∂V/∂t, annualized.
    pub theta: f64,
    /// ∂V/∂σ.
    pub vega: f64,
    /// ∂V/∂r.
    pub rho: f64,
}

impl Greeks {
    /// Theta per calendar day.
    #[must_use]
    pub fn theta_per_day(&self) -> f64 {
        self.theta / 365.0
    }

    /// Vega per one volatility point (1%).
    #[must_use]
    pub fn vega_per_vol_point(&self) -> f64 {
        self.vega / 100.0
    }

    /// Rho per one rate point (1%).
    #[must_use]
    pub fn rho_per_rate_point(&self) -> f64 {
        self.rho / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_views() {
        let greeks = Greeks {
            price: 4.76,
            delta: 0.78,
            gamma: 0.05,
            theta: -3.65,
            vega: 8.8,
            rho: 14.0,
        };
        assert!((greeks.theta_per_day() + 0.01).abs() < 1e-12);
        assert!((greeks.vega_per_vol_point() - 0.088).abs() < 1e-12);
        assert!((greeks.rho_per_rate_point() - 0.14).abs() < 1e-12);
    }
}
