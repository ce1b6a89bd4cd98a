//! JSON file-backed data sources.
//!
//! A data file holds one snapshot of company facts:
//!
//! ```json
//! {
//!   "companies": [
//!     {
//!       "ticker": "AAPL",
//!       "free_cash_flow": 71706000000,
//!       "cash_and_equivalents": 93025000000,
//!       "total_debt": 112723000000,
//!       "shares_outstanding": 17250000000,
//!       "beta": 1.31,
//!       "short_term_growth": 0.1246,
//!       "spot_price": 115.0,
//!       "volatility": 0.32
//!     }
//!   ]
//! }
//! ```
//!
//! The snapshot has no history, so the `as_of` date of every request is
//! accepted as is.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use fairval_config::DcfConfig;
use fairval_core::prelude::*;

use crate::error::{CliError, CliResult};

/// One company in a data file.
#[derive(Debug, Clone, Deserialize)]
struct CompanyRecord {
    #[serde(flatten)]
    fundamentals: CompanyFundamentals,
    short_term_growth: f64,
    #[serde(default)]
    medium_term_growth: Option<f64>,
    #[serde(default)]
    long_term_growth: Option<f64>,
    #[serde(default)]
    spot_price: Option<f64>,
    #[serde(default)]
    volatility: Option<f64>,
    #[serde(default)]
    dividend_yield: f64,
}

#[derive(Debug, Deserialize)]
struct CompanyFile {
    companies: Vec<CompanyRecord>,
}

/// Company facts loaded from a JSON file.
///
/// Discount rates come from the WACC table and missing medium or long-term
/// growth rates from the DCF convention of the active configuration.
pub struct JsonCompanySource {
    name: String,
    companies: HashMap<String, CompanyRecord>,
    wacc: WaccTable,
    dcf: DcfConfig,
}

impl JsonCompanySource {
    /// Loads every company in `path`. Tickers are matched case-insensitively.
    pub fn load(path: impl AsRef<Path>, wacc: WaccTable, dcf: DcfConfig) -> CliResult<Self> {
        let path = path.as_ref();
        let data_file_error = |reason: String| CliError::DataFile {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path).map_err(|e| data_file_error(e.to_string()))?;
        let file: CompanyFile =
            serde_json::from_str(&content).map_err(|e| data_file_error(e.to_string()))?;

        let companies: HashMap<_, _> = file
            .companies
            .into_iter()
            .map(|record| (record.fundamentals.ticker.to_uppercase(), record))
            .collect();
        tracing::debug!(
            path = %path.display(),
            companies = companies.len(),
            "loaded company data"
        );

        Ok(Self {
            name: path.display().to_string(),
            companies,
            wacc,
            dcf,
        })
    }

    fn record(&self, ticker: &str) -> ValuationResult<&CompanyRecord> {
        self.companies
            .get(&ticker.to_uppercase())
            .ok_or_else(|| {
                ValuationError::data_source(&self.name, format!("no record for {ticker}"))
            })
    }
}

impl FundamentalsSource for JsonCompanySource {
    fn fetch_fundamentals(&self, ticker: &str, as_of: Date) -> ValuationResult<ValuationInputs> {
        tracing::debug!(ticker, %as_of, source = %self.name, "fetching fundamentals");
        self.record(ticker)?
            .fundamentals
            .to_valuation_inputs(&self.wacc)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl GrowthRateSource for JsonCompanySource {
    fn growth_schedule(&self, ticker: &str, _as_of: Date) -> ValuationResult<GrowthSchedule> {
        let record = self.record(ticker)?;
        let short = record.short_term_growth;
        GrowthSchedule::builder()
            .short_term(short)
            .medium_term(
                record
                    .medium_term_growth
                    .unwrap_or(short * self.dcf.medium_term_ratio),
            )
            .long_term(record.long_term_growth.unwrap_or(self.dcf.long_term_growth))
            .build()
    }
}

impl MarketDataSource for JsonCompanySource {
    fn fetch_underlying(&self, ticker: &str, _as_of: Date) -> ValuationResult<Underlying> {
        let record = self.record(ticker)?;
        let missing = |field: &str| {
            ValuationError::data_source(&self.name, format!("{ticker} has no {field}"))
        };
        let spot = record.spot_price.ok_or_else(|| missing("spot_price"))?;
        let volatility = record.volatility.ok_or_else(|| missing("volatility"))?;

        Ok(Underlying::new(spot, volatility)
            .with_dividend_yield(record.dividend_yield)
            .with_symbol(record.fundamentals.ticker.clone()))
    }
}
