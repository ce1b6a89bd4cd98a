//! Beta to discount rate lookup.
//!
//! Discount rates are not derived from a full cost-of-capital build-up: a
//! company's beta selects a band, and the band carries the rate. The default
//! bands follow the common risk-free-rate plus equity-risk-premium table used
//! for quick DCF estimates.

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, ValuationError, ValuationResult};

/// One band of a [`WaccTable`]: betas strictly below `beta_below` map to `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaccBand {
    /// Exclusive upper bound of the band.
    pub beta_below: f64,
    /// Discount rate for betas in the band.
    pub rate: f64,
}

/// Piecewise-constant map from beta to discount rate.
///
/// Bands are scanned in ascending order; betas at or above the last bound get
/// `ceiling_rate`.
///
/// # Example
///
/// ```rust
/// use fairval_core::WaccTable;
///
/// let table = WaccTable::default();
/// assert_eq!(table.lookup(1.31).unwrap(), 0.08);
/// assert_eq!(table.lookup(0.5).unwrap(), 0.05);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaccTable {
    /// Bands in ascending order of `beta_below`.
    pub bands: Vec<WaccBand>,
    /// Rate for betas above every band.
    pub ceiling_rate: f64,
}

impl Default for WaccTable {
    fn default() -> Self {
        let band = |beta_below, rate| WaccBand { beta_below, rate };
        Self {
            bands: vec![
                band(0.80, 0.050),
                band(1.00, 0.060),
                band(1.10, 0.065),
                band(1.20, 0.070),
                band(1.30, 0.075),
                band(1.50, 0.080),
            ],
            ceiling_rate: 0.085,
        }
    }
}

impl WaccTable {
    /// Creates a table from explicit bands.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::Configuration` if the bands are not strictly
    /// ascending or any rate is at or below -1.
    pub fn new(bands: Vec<WaccBand>, ceiling_rate: f64) -> ValuationResult<Self> {
        let table = Self {
            bands,
            ceiling_rate,
        };
        table.validate()?;
        Ok(table)
    }

    /// Returns the discount rate for `beta`.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::Domain` if `beta` is NaN or infinite.
    pub fn lookup(&self, beta: f64) -> ValuationResult<f64> {
        require_finite("beta", beta)?;
        Ok(self
            .bands
            .iter()
            .find(|band| beta < band.beta_below)
            .map_or(self.ceiling_rate, |band| band.rate))
    }

    /// Checks the table is usable for lookups.
    pub fn validate(&self) -> ValuationResult<()> {
        let ascending = self
            .bands
            .windows(2)
            .all(|pair| pair[0].beta_below < pair[1].beta_below);
        if !ascending {
            return Err(ValuationError::configuration(
                "WACC bands must be in strictly ascending beta order",
            ));
        }
        let rates = self
            .bands
            .iter()
            .map(|band| band.rate)
            .chain(std::iter::once(self.ceiling_rate));
        for rate in rates {
            if !rate.is_finite() || rate <= -1.0 {
                return Err(ValuationError::configuration(format!(
                    "WACC rate {rate} must be finite and greater than -1"
                )));
            }
        }
        Ok(())
    }
}
