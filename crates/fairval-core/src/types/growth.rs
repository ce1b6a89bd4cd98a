//! Three-regime free cash flow growth schedule.

use serde::{Deserialize, Serialize};

use crate::error::{ValuationError, ValuationResult};

/// Free cash flow growth rates for the three projection regimes.
///
/// - `short_term` applies to periods 1-5
/// - `medium_term` applies to periods 6-10
/// - `long_term` applies to periods 11-20
///
/// Rates are per-period fractions and may be negative. A schedule can only be
/// obtained with all three rates set, so a valuation can never run against a
/// partially configured schedule.
///
/// # Example
///
/// ```rust
/// use fairval_core::GrowthSchedule;
///
/// let schedule = GrowthSchedule::builder()
///     .short_term(0.1246)
///     .medium_term(0.0623)
///     .long_term(0.04)
///     .build()
///     .unwrap();
/// assert_eq!(schedule.rate_for_period(7), Some(0.0623));
///
/// let missing = GrowthSchedule::builder().short_term(0.1246).build();
/// assert!(missing.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GrowthScheduleBuilder")]
pub struct GrowthSchedule {
    short_term: f64,
    medium_term: f64,
    long_term: f64,
}

impl GrowthSchedule {
    /// Last period of the short-term regime.
    pub const SHORT_TERM_END: u32 = 5;
    /// Last period of the medium-term regime.
    pub const MEDIUM_TERM_END: u32 = 10;
    /// Last projected period.
    pub const LONG_TERM_END: u32 = 20;

    /// Creates a schedule from three explicit rates.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::Configuration` if any rate is NaN or infinite.
    pub fn new(short_term: f64, medium_term: f64, long_term: f64) -> ValuationResult<Self> {
        Self::builder()
            .short_term(short_term)
            .medium_term(medium_term)
            .long_term(long_term)
            .build()
    }

    /// Creates a schedule using the conventional medium-term rate of half
    /// the short-term rate.
    ///
    /// This mirrors the usual calling convention where the short-term rate is
    /// an analyst five-year EPS growth estimate and the long-term rate is an
    /// assumption (commonly 4%).
    pub fn from_short_term(short_term: f64, long_term: f64) -> ValuationResult<Self> {
        Self::new(short_term, short_term / 2.0, long_term)
    }

    /// Returns a builder with no rates set.
    #[must_use]
    pub fn builder() -> GrowthScheduleBuilder {
        GrowthScheduleBuilder::default()
    }

    /// Growth rate for periods 1-5.
    #[must_use]
    pub fn short_term(&self) -> f64 {
        self.short_term
    }

    /// Growth rate for periods 6-10.
    #[must_use]
    pub fn medium_term(&self) -> f64 {
        self.medium_term
    }

    /// Growth rate for periods 11-20.
    #[must_use]
    pub fn long_term(&self) -> f64 {
        self.long_term
    }

    /// Returns the growth rate applying to `period`, or `None` outside 1..=20.
    #[must_use]
    pub fn rate_for_period(&self, period: u32) -> Option<f64> {
        match period {
            1..=Self::SHORT_TERM_END => Some(self.short_term),
            6..=Self::MEDIUM_TERM_END => Some(self.medium_term),
            11..=Self::LONG_TERM_END => Some(self.long_term),
            _ => None,
        }
    }
}

/// Builder for [`GrowthSchedule`].
///
/// Unset rates are reported as `ValuationError::Configuration` by
/// [`build`](GrowthScheduleBuilder::build). Also used as the serde
/// representation so that incomplete configuration documents fail the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthScheduleBuilder {
    #[serde(default)]
    short_term: Option<f64>,
    #[serde(default)]
    medium_term: Option<f64>,
    #[serde(default)]
    long_term: Option<f64>,
}

impl GrowthScheduleBuilder {
    /// Sets the periods 1-5 growth rate.
    #[must_use]
    pub fn short_term(mut self, rate: f64) -> Self {
        self.short_term = Some(rate);
        self
    }

    /// Sets the periods 6-10 growth rate.
    #[must_use]
    pub fn medium_term(mut self, rate: f64) -> Self {
        self.medium_term = Some(rate);
        self
    }

    /// Sets the periods 11-20 growth rate.
    #[must_use]
    pub fn long_term(mut self, rate: f64) -> Self {
        self.long_term = Some(rate);
        self
    }

    /// Builds the schedule.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::Configuration` naming the first rate that is
    /// unset or non-finite.
    pub fn build(self) -> ValuationResult<GrowthSchedule> {
        Ok(GrowthSchedule {
            short_term: required("short_term", self.short_term)?,
            medium_term: required("medium_term", self.medium_term)?,
            long_term: required("long_term", self.long_term)?,
        })
    }
}

impl TryFrom<GrowthScheduleBuilder> for GrowthSchedule {
    type Error = ValuationError;

    fn try_from(builder: GrowthScheduleBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

fn required(name: &str, rate: Option<f64>) -> ValuationResult<f64> {
    match rate {
        None => Err(ValuationError::configuration(format!(
            "{name} growth rate is not set"
        ))),
        Some(r) if !r.is_finite() => Err(ValuationError::configuration(format!(
            "{name} growth rate must be finite, got {r}"
        ))),
        Some(r) => Ok(r),
    }
}
