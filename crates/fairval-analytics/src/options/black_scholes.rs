//! Black-Scholes engine for European equity options.
//!
//! ```text
//! call = S·Φ(d1) - K·e^(-rT)·Φ(d2)
//! put  = K·e^(-rT)·Φ(-d2) - S·Φ(-d1)
//! ```
//!
//! The dividend yield q enters the prices and delta only through d1 and d2.
//! Gamma, theta and vega also carry the e^(-qT) factor. Put-call parity is
//! taken on the undiscounted spot, `C - P = S - K·e^(-rT)`, which the model
//! prices satisfy exactly for any q.

use fairval_core::error::{require_finite, require_positive};
use fairval_core::{
    FinancialOption, OptionStyle, OptionType, PricingContext, ValuationError, ValuationResult,
};

use super::distribution::{norm_cdf, norm_pdf};
use super::greeks::Greeks;

/// Validated inputs plus the shared d1/d2 intermediates of one pricing call.
#[derive(Debug, Clone, Copy)]
struct Terms {
    option_type: OptionType,
    spot: f64,
    strike: f64,
    time: f64,
    vol: f64,
    rate: f64,
    dividend_yield: f64,
    sqrt_t: f64,
    d1: f64,
    d2: f64,
    /// e^(-rT)
    df_rate: f64,
    /// e^(-qT)
    df_dividend: f64,
}

impl Terms {
    fn price(&self) -> f64 {
        match self.option_type {
            OptionType::Call => {
                self.spot * norm_cdf(self.d1) - self.strike * self.df_rate * norm_cdf(self.d2)
            }
            OptionType::Put => {
                self.strike * self.df_rate * norm_cdf(-self.d2) - self.spot * norm_cdf(-self.d1)
            }
        }
    }

    fn delta(&self) -> f64 {
        match self.option_type {
            OptionType::Call => norm_cdf(self.d1),
            OptionType::Put => norm_cdf(self.d1) - 1.0,
        }
    }

    fn gamma(&self) -> f64 {
        norm_pdf(self.d1) * self.df_dividend / (self.spot * self.vol * self.sqrt_t)
    }

    fn theta(&self) -> f64 {
        let decay =
            -self.spot * norm_pdf(self.d1) * self.vol * self.df_dividend / (2.0 * self.sqrt_t);
        match self.option_type {
            OptionType::Call => {
                decay + self.dividend_yield * self.spot * norm_cdf(self.d1) * self.df_dividend
                    - self.rate * self.strike * self.df_rate * norm_cdf(self.d2)
            }
            OptionType::Put => {
                decay - self.dividend_yield * self.spot * norm_cdf(-self.d1) * self.df_dividend
                    + self.rate * self.strike * self.df_rate * norm_cdf(-self.d2)
            }
        }
    }

    fn vega(&self) -> f64 {
        self.spot * self.sqrt_t * norm_pdf(self.d1) * self.df_dividend
    }

    fn rho(&self) -> f64 {
        match self.option_type {
            OptionType::Call => self.strike * self.time * self.df_rate * norm_cdf(self.d2),
            OptionType::Put => -self.strike * self.time * self.df_rate * norm_cdf(-self.d2),
        }
    }
}

/// Black-Scholes pricing engine.
///
/// Configured once with a [`PricingContext`]; every method is a pure function
/// of the option and that context. The engine is `Copy` and can be shared
/// across threads freely.
///
/// # Example
///
/// ```rust
/// use fairval_analytics::BlackScholesEngine;
/// use fairval_core::{Date, FinancialOption, PricingContext, Underlying};
///
/// let engine = BlackScholesEngine::new(PricingContext::new(
///     Date::from_ymd(2023, 11, 1).unwrap(),
///     0.1,
/// ));
/// let stock = Underlying::new(42.0, 0.2);
/// let put = FinancialOption::european_put(&stock, 40.0, 0.5);
///
/// let price = engine.price(&put).unwrap();
/// assert!((price - 0.8086).abs() < 1e-4);
///
/// // The call implied by parity matches the model call price.
/// let call = engine.parity_price(&put, price).unwrap();
/// assert!((call - engine.price(&put.opposite()).unwrap()).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesEngine {
    context: PricingContext,
}

impl BlackScholesEngine {
    /// Creates an engine for the given pricing context.
    #[must_use]
    pub fn new(context: PricingContext) -> Self {
        Self { context }
    }

    /// Returns the pricing context.
    #[must_use]
    pub fn context(&self) -> &PricingContext {
        &self.context
    }

    /// Returns the continuously compounded risk-free rate.
    #[must_use]
    pub fn risk_free_rate(&self) -> f64 {
        self.context.risk_free_rate
    }

    /// Returns `(d1, d2)` for `option`.
    ///
    /// # Errors
    ///
    /// See [`price`](Self::price).
    pub fn d1_d2(&self, option: &FinancialOption<'_>) -> ValuationResult<(f64, f64)> {
        self.terms(option).map(|t| (t.d1, t.d2))
    }

    /// Model price of `option`.
    ///
    /// # Errors
    ///
    /// - `ValuationError::UnsupportedStyle` for American options
    /// - `ValuationError::Domain` for non-positive spot, strike, volatility or
    ///   time to expiry, or non-finite rates
    pub fn price(&self, option: &FinancialOption<'_>) -> ValuationResult<f64> {
        self.terms(option).map(|t| t.price())
    }

    /// Delta: Φ(d1) for calls, Φ(d1) - 1 for puts.
    pub fn delta(&self, option: &FinancialOption<'_>) -> ValuationResult<f64> {
        self.terms(option).map(|t| t.delta())
    }

    /// Gamma: φ(d1)·e^(-qT) / (S·σ·√T), identical for calls and puts.
    pub fn gamma(&self, option: &FinancialOption<'_>) -> ValuationResult<f64> {
        self.terms(option).map(|t| t.gamma())
    }

    /// Theta, annualized (not negated, not per day). Equals ∂V/∂t when the
    /// dividend yield is zero.
    pub fn theta(&self, option: &FinancialOption<'_>) -> ValuationResult<f64> {
        self.terms(option).map(|t| t.theta())
    }

    /// Vega: S·√T·φ(d1)·e^(-qT), identical for calls and puts.
    pub fn vega(&self, option: &FinancialOption<'_>) -> ValuationResult<f64> {
        self.terms(option).map(|t| t.vega())
    }

    /// Rho: K·T·e^(-rT)·Φ(d2) for calls, -K·T·e^(-rT)·Φ(-d2) for puts.
    pub fn rho(&self, option: &FinancialOption<'_>) -> ValuationResult<f64> {
        self.terms(option).map(|t| t.rho())
    }

    /// Price and all five Greeks from a single d1/d2 evaluation.
    pub fn greeks(&self, option: &FinancialOption<'_>) -> ValuationResult<Greeks> {
        let t = self.terms(option)?;
        Ok(Greeks {
            price: t.price(),
            delta: t.delta(),
            gamma: t.gamma(),
            theta: t.theta(),
            vega: t.vega(),
            rho: t.rho(),
        })
    }

    /// No-arbitrage price of the opposite side given `observed_price` for
    /// `option`.
    ///
    /// For a call returns the put `C + K·e^(-rT) - S`; for a put returns the
    /// call `P - K·e^(-rT) + S`. Volatility and dividend yield play no part.
    ///
    /// # Errors
    ///
    /// `ValuationError::UnsupportedStyle` for American options (parity is an
    /// equality only for European exercise); `ValuationError::Domain` for
    /// non-positive spot, strike or time, or a non-finite observed price.
    pub fn parity_price(
        &self,
        option: &FinancialOption<'_>,
        observed_price: f64,
    ) -> ValuationResult<f64> {
        ensure_european(option)?;
        let spot = require_positive("spot_price", option.underlying.spot_price)?;
        let strike = require_positive("strike", option.strike)?;
        let time = require_positive("time_to_expiry", option.time_to_expiry)?;
        let observed = require_finite("observed_price", observed_price)?;
        require_finite("risk_free_rate", self.context.risk_free_rate)?;

        let pv_strike = strike * self.context.discount_factor(time);

        Ok(match option.option_type {
            OptionType::Call => observed + pv_strike - spot,
            OptionType::Put => observed - pv_strike + spot,
        })
    }

    /// Deviation of model prices from put-call parity for `option`'s terms:
    /// `C - P - (S - K·e^(-rT))`. Zero up to rounding.
    pub fn parity_gap(&self, option: &FinancialOption<'_>) -> ValuationResult<f64> {
        let call = FinancialOption {
            option_type: OptionType::Call,
            ..*option
        };
        let put = call.opposite();
        let c = self.terms(&call)?;
        let p = self.terms(&put)?;
        let forward_gap = c.spot - c.strike * c.df_rate;
        Ok(c.price() - p.price() - forward_gap)
    }

    fn terms(&self, option: &FinancialOption<'_>) -> ValuationResult<Terms> {
        ensure_european(option)?;

        let spot = require_positive("spot_price", option.underlying.spot_price)?;
        let strike = require_positive("strike", option.strike)?;
        let vol = require_positive("volatility", option.underlying.volatility)?;
        let time = require_positive("time_to_expiry", option.time_to_expiry)?;
        let dividend_yield = require_finite("dividend_yield", option.underlying.dividend_yield)?;
        let rate = require_finite("risk_free_rate", self.context.risk_free_rate)?;

        let sqrt_t = time.sqrt();
        let vol_sqrt_t = vol * sqrt_t;
        let d1 = ((spot / strike).ln() + (rate - dividend_yield + vol * vol / 2.0) * time)
            / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;

        Ok(Terms {
            option_type: option.option_type,
            spot,
            strike,
            time,
            vol,
            rate,
            dividend_yield,
            sqrt_t,
            d1,
            d2,
            df_rate: (-rate * time).exp(),
            df_dividend: (-dividend_yield * time).exp(),
        })
    }
}

fn ensure_european(option: &FinancialOption<'_>) -> ValuationResult<()> {
    match option.option_style {
        OptionStyle::European => Ok(()),
        style @ OptionStyle::American => Err(ValuationError::UnsupportedStyle { style }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fairval_core::{Date, Underlying};

    fn engine(rate: f64) -> BlackScholesEngine {
        BlackScholesEngine::new(PricingContext::new(
            Date::from_ymd(2023, 11, 1).unwrap(),
            rate,
        ))
    }

    fn hull_stock() -> Underlying {
        Underlying::new(42.0, 0.2)
    }

    #[test]
    fn test_hull_d1_d2() {
        let stock = hull_stock();
        let call = FinancialOption::european_call(&stock, 40.0, 0.5);
        let (d1, d2) = engine(0.1).d1_d2(&call).unwrap();
        assert_relative_eq!(d1, 0.769_262_628_106_031_5, max_relative = 1e-12);
        assert_relative_eq!(d2, 0.627_841_271_868_722, max_relative = 1e-12);
    }

    #[test]
    fn test_hull_prices() {
        let stock = hull_stock();
        let bs = engine(0.1);
        let call = FinancialOption::european_call(&stock, 40.0, 0.5);
        let put = FinancialOption::european_put(&stock, 40.0, 0.5);
        let (c, p) = (bs.price(&call).unwrap(), bs.price(&put).unwrap());
        assert_relative_eq!(c, 4.759_422_392_871_535, max_relative = 1e-6);
        assert_relative_eq!(p, 0.808_599_372_900_095_8, max_relative = 1e-6);
    }

    #[test]
    fn test_put_greeks() {
        let stock = hull_stock();
        let put = FinancialOption::european_put(&stock, 40.0, 0.5);
        let g = engine(0.1).greeks(&put).unwrap();
        assert_relative_eq!(g.delta, -0.220_868_709_057_331, max_relative = 1e-6);
        assert_relative_eq!(g.gamma, 0.049_962_670_405_911_85, max_relative = 1e-6);
        assert_relative_eq!(g.theta, -0.754_174_496_589_770_5, max_relative = 1e-6);
        assert_relative_eq!(g.vega, 8.813_415_059_602_853, max_relative = 1e-6);
        assert_relative_eq!(g.rho, -5.042_542_576_653_999, max_relative = 1e-6);
    }

    #[test]
    fn test_greeks_bundle_matches_individual_calls() {
        let stock = hull_stock().with_dividend_yield(0.03);
        let call = FinancialOption::european_call(&stock, 45.0, 0.75);
        let bs = engine(0.05);
        let g = bs.greeks(&call).unwrap();
        assert_eq!(g.price, bs.price(&call).unwrap());
        assert_eq!(g.delta, bs.delta(&call).unwrap());
        assert_eq!(g.gamma, bs.gamma(&call).unwrap());
        assert_eq!(g.theta, bs.theta(&call).unwrap());
        assert_eq!(g.vega, bs.vega(&call).unwrap());
        assert_eq!(g.rho, bs.rho(&call).unwrap());
    }

    #[test]
    fn test_dividend_yield_prices() {
        let stock = Underlying::new(100.0, 0.25).with_dividend_yield(0.03);
        let bs = engine(0.05);
        let call = FinancialOption::european_call(&stock, 95.0, 1.0);
        let put = call.opposite();

        // q shifts d1 and d2; the spot term itself is not discounted.
        let c = bs.price(&call).unwrap();
        assert_relative_eq!(c, 14.982_827_836_602_574, max_relative = 1e-9);
        assert_relative_eq!(bs.price(&put).unwrap(), 5.349_623_164_170_41, max_relative = 1e-9);
        assert_relative_eq!(bs.delta(&call).unwrap(), 0.659_160_542_322_182_9, max_relative = 1e-9);
        assert_relative_eq!(
            bs.delta(&put).unwrap(),
            -0.340_839_457_677_817_1,
            max_relative = 1e-9
        );

        // P = C + K·e^(-rT) - S
        let put_from_parity = bs.parity_price(&call, c).unwrap();
        assert_relative_eq!(put_from_parity, 5.349_623_164_170_396, epsilon = 1e-9);
    }

    #[test]
    fn test_dividend_yield_discounts_gamma_and_vega() {
        let bs = engine(0.05);
        let plain = Underlying::new(100.0, 0.25);
        let payer = plain.clone().with_dividend_yield(0.03);
        let g_plain = bs
            .greeks(&FinancialOption::european_call(&plain, 95.0, 1.0))
            .unwrap();
        let g_payer = bs
            .greeks(&FinancialOption::european_call(&payer, 95.0, 1.0))
            .unwrap();
        let (d1, _) = bs
            .d1_d2(&FinancialOption::european_call(&payer, 95.0, 1.0))
            .unwrap();

        let df_q = (-0.03f64).exp();
        assert_relative_eq!(g_payer.vega, 100.0 * norm_pdf(d1) * df_q, max_relative = 1e-12);
        assert_relative_eq!(
            g_payer.gamma,
            norm_pdf(d1) * df_q / (100.0 * 0.25),
            max_relative = 1e-12
        );
        assert!(g_payer.delta < g_plain.delta);
    }

    #[test]
    fn test_gamma_and_vega_same_for_both_sides() {
        let stock = hull_stock().with_dividend_yield(0.02);
        let bs = engine(0.03);
        let call = FinancialOption::european_call(&stock, 44.0, 1.2);
        let put = call.opposite();
        assert_eq!(bs.gamma(&call).unwrap(), bs.gamma(&put).unwrap());
        assert_eq!(bs.vega(&call).unwrap(), bs.vega(&put).unwrap());
    }

    #[test]
    fn test_delta_matches_finite_difference() {
        let bs = engine(0.04);
        let h = 1e-4;
        let up = Underlying::new(50.0 + h, 0.3);
        let down = Underlying::new(50.0 - h, 0.3);
        let mid = Underlying::new(50.0, 0.3);

        for option_type in [OptionType::Call, OptionType::Put] {
            let p_up = bs
                .price(&FinancialOption::european(&up, 52.0, 0.8, option_type))
                .unwrap();
            let p_down = bs
                .price(&FinancialOption::european(&down, 52.0, 0.8, option_type))
                .unwrap();
            let delta = bs
                .delta(&FinancialOption::european(&mid, 52.0, 0.8, option_type))
                .unwrap();
            assert_relative_eq!(delta, (p_up - p_down) / (2.0 * h), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_theta_matches_finite_difference() {
        let bs = engine(0.04);
        let stock = Underlying::new(50.0, 0.3);
        let h = 1e-5;
        for option_type in [OptionType::Call, OptionType::Put] {
            let at = |t: f64| {
                bs.price(&FinancialOption::european(&stock, 48.0, t, option_type))
                    .unwrap()
            };
            let theta = bs
                .theta(&FinancialOption::european(&stock, 48.0, 0.6, option_type))
                .unwrap();
            // Calendar time runs opposite to time to expiry.
            let fd = -(at(0.6 + h) - at(0.6 - h)) / (2.0 * h);
            assert_relative_eq!(theta, fd, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_parity_price_round_trip() {
        let stock = hull_stock().with_dividend_yield(0.015);
        let bs = engine(0.1);
        let call = FinancialOption::european_call(&stock, 40.0, 0.5);
        let put = call.opposite();

        let c = bs.price(&call).unwrap();
        let p = bs.price(&put).unwrap();
        assert_relative_eq!(bs.parity_price(&call, c).unwrap(), p, epsilon = 1e-9);
        assert_relative_eq!(bs.parity_price(&put, p).unwrap(), c, epsilon = 1e-9);
        assert!(bs.parity_gap(&put).unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_hull_parity_value() {
        let stock = hull_stock();
        let call = FinancialOption::european_call(&stock, 40.0, 0.5);
        // P = C + K·e^(-rT) - S
        let put_from_parity = engine(0.1).parity_price(&call, 4.759_422_392_871_535).unwrap();
        assert_relative_eq!(put_from_parity, 0.808_599_372_900_095_8, epsilon = 1e-9);
    }

    #[test]
    fn test_short_dated_delta_limits() {
        let bs = engine(0.1);
        let itm = Underlying::new(50.0, 0.2);
        let otm = Underlying::new(30.0, 0.2);
        let itm_delta = bs
            .delta(&FinancialOption::european_call(&itm, 40.0, 0.001))
            .unwrap();
        let otm_delta = bs
            .delta(&FinancialOption::european_call(&otm, 40.0, 0.001))
            .unwrap();
        assert_relative_eq!(itm_delta, 1.0, epsilon = 1e-6);
        assert_relative_eq!(otm_delta, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_zero_time_and_volatility() {
        let bs = engine(0.1);

        let stock = hull_stock();
        let expired = FinancialOption::european_call(&stock, 40.0, 0.0);
        assert!(matches!(
            bs.price(&expired),
            Err(ValuationError::Domain {
                parameter: "time_to_expiry",
                ..
            })
        ));

        let flat = Underlying::new(42.0, 0.0);
        let call = FinancialOption::european_call(&flat, 40.0, 0.5);
        for result in [bs.price(&call), bs.delta(&call), bs.gamma(&call), bs.vega(&call)] {
            assert!(matches!(
                result,
                Err(ValuationError::Domain {
                    parameter: "volatility",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_rejects_non_positive_spot_and_strike() {
        let bs = engine(0.1);
        let bad_spot = Underlying::new(0.0, 0.2);
        assert!(bs
            .price(&FinancialOption::european_call(&bad_spot, 40.0, 0.5))
            .unwrap_err()
            .is_domain());
        let stock = hull_stock();
        assert!(bs
            .price(&FinancialOption::european_put(&stock, -1.0, 0.5))
            .unwrap_err()
            .is_domain());
    }

    #[test]
    fn test_american_style_rejected_everywhere() {
        let bs = engine(0.1);
        let stock = hull_stock();
        for option_type in [OptionType::Call, OptionType::Put] {
            let american = FinancialOption::american(&stock, 40.0, 0.5, option_type);
            let results = [
                bs.price(&american),
                bs.delta(&american),
                bs.gamma(&american),
                bs.theta(&american),
                bs.vega(&american),
                bs.rho(&american),
                bs.parity_price(&american, 1.0),
                bs.greeks(&american).map(|g| g.price),
            ];
            for result in results {
                assert_eq!(
                    result,
                    Err(ValuationError::UnsupportedStyle {
                        style: OptionStyle::American
                    })
                );
            }
        }
    }

    #[test]
    fn test_negative_rate_is_valid() {
        let stock = hull_stock();
        let call = FinancialOption::european_call(&stock, 40.0, 0.5);
        let price = engine(-0.01).price(&call).unwrap();
        assert!(price > call.intrinsic_value());
    }
}
