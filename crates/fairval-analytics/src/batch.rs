//! Batch valuation.
//!
//! Each security is valued independently; one failure never aborts the rest
//! of the batch. With the `parallel` feature the work is spread over the
//! rayon thread pool, otherwise it runs sequentially. Results are returned in
//! input order either way.

use fairval_core::{FinancialOption, GrowthSchedule, ValuationInputs, ValuationResult};
use serde::{Deserialize, Serialize};

use crate::dcf::DcfEngine;
use crate::options::{BlackScholesEngine, Greeks};

/// One equity to value: its inputs and the growth schedule to project with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfRequest {
    /// Cash flow, balance sheet and discount rate inputs.
    pub inputs: ValuationInputs,
    /// Growth schedule.
    pub schedule: GrowthSchedule,
}

impl DcfRequest {
    /// Creates a new request.
    #[must_use]
    pub fn new(inputs: ValuationInputs, schedule: GrowthSchedule) -> Self {
        Self { inputs, schedule }
    }

    fn evaluate(&self) -> ValuationResult<f64> {
        DcfEngine::new(self.schedule).fair_value(&self.inputs)
    }
}

/// Fair value per share for each request, in parallel.
#[cfg(feature = "parallel")]
pub fn fair_values(requests: &[DcfRequest]) -> Vec<ValuationResult<f64>> {
    use rayon::prelude::*;

    log::debug!("valuing {} equities in parallel", requests.len());
    requests.par_iter().map(DcfRequest::evaluate).collect()
}

/// Fair value per share for each request, sequentially.
#[cfg(not(feature = "parallel"))]
pub fn fair_values(requests: &[DcfRequest]) -> Vec<ValuationResult<f64>> {
    log::debug!("valuing {} equities", requests.len());
    requests.iter().map(DcfRequest::evaluate).collect()
}

/// Price and Greeks for each option under one engine, in parallel.
#[cfg(feature = "parallel")]
pub fn greeks_for(
    engine: &BlackScholesEngine,
    options: &[FinancialOption<'_>],
) -> Vec<ValuationResult<Greeks>> {
    use rayon::prelude::*;

    options.par_iter().map(|option| engine.greeks(option)).collect()
}

/// Price and Greeks for each option under one engine, sequentially.
#[cfg(not(feature = "parallel"))]
pub fn greeks_for(
    engine: &BlackScholesEngine,
    options: &[FinancialOption<'_>],
) -> Vec<ValuationResult<Greeks>> {
    options.iter().map(|option| engine.greeks(option)).collect()
}
