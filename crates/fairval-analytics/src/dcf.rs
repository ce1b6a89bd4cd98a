//! Multi-stage discounted cash flow valuation.
//!
//! Free cash flow grows through three regimes and each projected cash flow
//! is discounted at the company's discount rate:
//!
//! ```text
//! cf5  = cf0 · (1 + g_s)^5
//! cf10 = cf5 · (1 + g_m)^5
//!
//! PV = Σ_{i=1..5}   cf0  · (1 + g_s)^i      / (1 + r)^i
//!    + Σ_{i=6..10}  cf5  · (1 + g_m)^(i-5)  / (1 + r)^i
//!    + Σ_{i=11..20} cf10 · (1 + g_l)^(i-10) / (1 + r)^i
//!
//! fair value = (PV + cash - debt) / shares
//! ```
//!
//! Cash flows beyond year 20 are valued at zero: there is no terminal value.
//! This understates companies whose cash flows persist past the horizon and
//! is kept as the model's stated simplification.
//!
//! Terms are accumulated in increasing period order, short regime first, so
//! results are reproducible to the last bit for fixed inputs.

use serde::Serialize;
use std::ops::RangeInclusive;

use fairval_core::{GrowthSchedule, ValuationInputs, ValuationResult};

/// Number of projected periods.
pub const PROJECTION_YEARS: u32 = GrowthSchedule::LONG_TERM_END;

/// One of the three growth regimes of the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthRegime {
    /// Periods 1-5.
    ShortTerm,
    /// Periods 6-10.
    MediumTerm,
    /// Periods 11-20.
    LongTerm,
}

impl GrowthRegime {
    /// All regimes in projection order.
    pub const ALL: [GrowthRegime; 3] = [Self::ShortTerm, Self::MediumTerm, Self::LongTerm];

    /// Periods covered by this regime.
    #[must_use]
    pub fn periods(self) -> RangeInclusive<u32> {
        match self {
            Self::ShortTerm => 1..=GrowthSchedule::SHORT_TERM_END,
            Self::MediumTerm => {
                (GrowthSchedule::SHORT_TERM_END + 1)..=GrowthSchedule::MEDIUM_TERM_END
            }
            Self::LongTerm => (GrowthSchedule::MEDIUM_TERM_END + 1)..=GrowthSchedule::LONG_TERM_END,
        }
    }

    /// Growth rate the schedule assigns to this regime.
    #[must_use]
    pub fn rate(self, schedule: &GrowthSchedule) -> f64 {
        match self {
            Self::ShortTerm => schedule.short_term(),
            Self::MediumTerm => schedule.medium_term(),
            Self::LongTerm => schedule.long_term(),
        }
    }

    /// Number of periods preceding this regime.
    fn offset(self) -> u32 {
        self.periods().start() - 1
    }
}

/// A single projected and discounted cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedCashFlow {
    /// Period number (1-20).
    pub period: u32,
    /// Regime the period belongs to.
    pub regime: GrowthRegime,
    /// Undiscounted projected free cash flow.
    pub cash_flow: f64,
    /// 1 / (1 + r)^period.
    pub discount_factor: f64,
    /// Discounted value of the cash flow.
    pub present_value: f64,
}

/// Full breakdown of a DCF valuation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DcfValuation {
    /// Discount rate used.
    pub discount_rate: f64,
    /// Growth schedule used.
    pub schedule: GrowthSchedule,
    /// Projected cash flows, periods 1-20 in order.
    pub projected: Vec<ProjectedCashFlow>,
    /// Sum of discounted projected cash flows.
    pub pv_of_cash_flows: f64,
    /// Cash and equivalents less total debt.
    pub net_cash: f64,
    /// `pv_of_cash_flows + net_cash`.
    pub equity_value: f64,
    /// Shares outstanding.
    pub shares_outstanding: f64,
    /// `equity_value / shares_outstanding`.
    pub fair_value_per_share: f64,
}

impl DcfValuation {
    /// Present value contributed by one regime.
    #[must_use]
    pub fn pv_of_regime(&self, regime: GrowthRegime) -> f64 {
        self.projected
            .iter()
            .filter(|cf| cf.regime == regime)
            .map(|cf| cf.present_value)
            .sum()
    }
}

/// Discounted cash flow engine configured with one growth schedule.
///
/// # Example
///
/// ```rust
/// use fairval_analytics::DcfEngine;
/// use fairval_core::{GrowthSchedule, ValuationInputs};
///
/// let schedule = GrowthSchedule::new(0.1246, 0.0623, 0.04).unwrap();
/// let inputs = ValuationInputs::new(71_706e6, 93_025e6, 112_723e6, 17_250e6, 0.08);
///
/// let engine = DcfEngine::new(schedule);
/// let value = engine.fair_value(&inputs).unwrap();
/// assert!((value - 84.88).abs() < 1e-2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcfEngine {
    schedule: GrowthSchedule,
}

impl DcfEngine {
    /// Creates an engine for the given schedule.
    #[must_use]
    pub fn new(schedule: GrowthSchedule) -> Self {
        Self { schedule }
    }

    /// Returns the engine's growth schedule.
    #[must_use]
    pub fn schedule(&self) -> &GrowthSchedule {
        &self.schedule
    }

    /// Per-share fair value of `inputs`.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::Domain` if `shares_outstanding <= 0`,
    /// `discount_rate <= -1`, or any amount is non-finite.
    pub fn fair_value(&self, inputs: &ValuationInputs) -> ValuationResult<f64> {
        self.valuation(inputs).map(|v| v.fair_value_per_share)
    }

    /// Runs the valuation and returns every intermediate amount.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::Domain` if `shares_outstanding <= 0`,
    /// `discount_rate <= -1`, or any amount is non-finite.
    pub fn valuation(&self, inputs: &ValuationInputs) -> ValuationResult<DcfValuation> {
        inputs.validate()?;

        let r = inputs.discount_rate;
        let cf0 = inputs.free_cash_flow;
        let cf5 = cf0 * (1.0 + self.schedule.short_term()).powi(5);
        let cf10 = cf5 * (1.0 + self.schedule.medium_term()).powi(5);

        let mut projected = Vec::with_capacity(PROJECTION_YEARS as usize);
        let mut total = 0.0;

        for regime in GrowthRegime::ALL {
            let base = match regime {
                GrowthRegime::ShortTerm => cf0,
                GrowthRegime::MediumTerm => cf5,
                GrowthRegime::LongTerm => cf10,
            };
            let growth = 1.0 + regime.rate(&self.schedule);

            for period in regime.periods() {
                let cash_flow = base * growth.powi(exponent(period - regime.offset()));
                let compounding = (1.0 + r).powi(exponent(period));
                let present_value = cash_flow / compounding;
                total += present_value;

                projected.push(ProjectedCashFlow {
                    period,
                    regime,
                    cash_flow,
                    discount_factor: 1.0 / compounding,
                    present_value,
                });
            }
        }

        let net_cash = inputs.net_cash();
        let equity_value = total + inputs.cash_and_equivalents - inputs.total_debt;
        let fair_value_per_share = equity_value / inputs.shares_outstanding;

        log::debug!(
            "DCF: r={r}, growth=({}, {}, {}), pv={total}, fair value={fair_value_per_share}",
            self.schedule.short_term(),
            self.schedule.medium_term(),
            self.schedule.long_term()
        );

        Ok(DcfValuation {
            discount_rate: r,
            schedule: self.schedule,
            projected,
            pv_of_cash_flows: total,
            net_cash,
            equity_value,
            shares_outstanding: inputs.shares_outstanding,
            fair_value_per_share,
        })
    }
}

/// Per-share fair value of `inputs` under `schedule`.
///
/// Shorthand for `DcfEngine::new(*schedule).fair_value(inputs)`.
pub fn fair_value(inputs: &ValuationInputs, schedule: &GrowthSchedule) -> ValuationResult<f64> {
    DcfEngine::new(*schedule).fair_value(inputs)
}

// Periods never exceed PROJECTION_YEARS.
#[allow(clippy::cast_possible_wrap)]
fn exponent(period: u32) -> i32 {
    period as i32
}
