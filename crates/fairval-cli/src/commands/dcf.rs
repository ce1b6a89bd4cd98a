//! DCF command implementation.
//!
//! Values an equity from explicit inputs or from a company data file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fairval_analytics::{DcfEngine, DcfValuation, GrowthRegime, ProjectedCashFlow};
use fairval_config::ValuationConfig;
use fairval_core::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::date_or_today;
use crate::error::CliError;
use crate::output::{print_header, print_output, print_record, KeyValue};
use crate::source::JsonCompanySource;

/// Arguments for the dcf command.
#[derive(Args, Debug)]
pub struct DcfArgs {
    /// Ticker to look up in the data file
    #[arg(long, requires = "data")]
    pub ticker: Option<String>,

    /// JSON company data file
    #[arg(long, requires = "ticker")]
    pub data: Option<PathBuf>,

    /// Valuation date for data lookups (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub as_of: Option<String>,

    /// Latest free cash flow
    #[arg(long, allow_negative_numbers = true, conflicts_with = "ticker")]
    pub fcf: Option<f64>,

    /// Cash and cash equivalents
    #[arg(long, conflicts_with = "ticker")]
    pub cash: Option<f64>,

    /// Total debt
    #[arg(long, conflicts_with = "ticker")]
    pub debt: Option<f64>,

    /// Shares outstanding
    #[arg(long, conflicts_with = "ticker")]
    pub shares: Option<f64>,

    /// Discount rate as a fraction (e.g. 0.08 for 8%)
    #[arg(long, allow_negative_numbers = true, conflicts_with = "beta")]
    pub discount_rate: Option<f64>,

    /// Equity beta, mapped to a discount rate through the WACC table
    #[arg(long, conflicts_with = "ticker")]
    pub beta: Option<f64>,

    /// Growth for years 1-5 as a fraction
    #[arg(long, allow_negative_numbers = true)]
    pub short_growth: Option<f64>,

    /// Growth for years 6-10. Defaults to the configured ratio of short growth.
    #[arg(long, allow_negative_numbers = true)]
    pub medium_growth: Option<f64>,

    /// Growth for years 11-20. Defaults to the configured long-term growth.
    #[arg(long, allow_negative_numbers = true)]
    pub long_growth: Option<f64>,

    /// Show every projected cash flow
    #[arg(long)]
    pub breakdown: bool,
}

/// Headline figures of a valuation.
#[derive(Debug, Serialize)]
struct DcfSummary {
    ticker: Option<String>,
    discount_rate: f64,
    short_term_growth: f64,
    medium_term_growth: f64,
    long_term_growth: f64,
    pv_of_cash_flows: f64,
    net_cash: f64,
    equity_value: f64,
    shares_outstanding: f64,
    fair_value_per_share: f64,
}

impl DcfSummary {
    fn new(ticker: Option<String>, valuation: &DcfValuation) -> Self {
        Self {
            ticker,
            discount_rate: valuation.discount_rate,
            short_term_growth: valuation.schedule.short_term(),
            medium_term_growth: valuation.schedule.medium_term(),
            long_term_growth: valuation.schedule.long_term(),
            pv_of_cash_flows: valuation.pv_of_cash_flows,
            net_cash: valuation.net_cash,
            equity_value: valuation.equity_value,
            shares_outstanding: valuation.shares_outstanding,
            fair_value_per_share: valuation.fair_value_per_share,
        }
    }
}

#[derive(Debug, Serialize)]
struct DcfReport<'a> {
    #[serde(flatten)]
    summary: &'a DcfSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    projected: Option<&'a [ProjectedCashFlow]>,
}

/// One row of the cash flow breakdown.
#[derive(Debug, Serialize, Tabled)]
struct CashFlowRow {
    #[tabled(rename = "Year")]
    year: u32,
    #[tabled(rename = "Regime")]
    regime: &'static str,
    #[tabled(rename = "Cash Flow")]
    cash_flow: String,
    #[tabled(rename = "Discount Factor")]
    discount_factor: String,
    #[tabled(rename = "Present Value")]
    present_value: String,
}

impl From<&ProjectedCashFlow> for CashFlowRow {
    fn from(cf: &ProjectedCashFlow) -> Self {
        Self {
            year: cf.period,
            regime: regime_label(cf.regime),
            cash_flow: crate::output::format_amount(cf.cash_flow),
            discount_factor: format!("{:.6}", cf.discount_factor),
            present_value: crate::output::format_amount(cf.present_value),
        }
    }
}

fn regime_label(regime: GrowthRegime) -> &'static str {
    match regime {
        GrowthRegime::ShortTerm => "short",
        GrowthRegime::MediumTerm => "medium",
        GrowthRegime::LongTerm => "long",
    }
}

/// Execute the dcf command.
pub fn execute(args: DcfArgs, config: &ValuationConfig, format: OutputFormat) -> Result<()> {
    let (inputs, schedule) = match (&args.ticker, &args.data) {
        (Some(ticker), Some(data)) => inputs_from_file(&args, ticker, data, config)?,
        _ => inputs_from_args(&args, config)?,
    };

    let valuation = DcfEngine::new(schedule).valuation(&inputs)?;
    tracing::info!(
        ticker = args.ticker.as_deref().unwrap_or("-"),
        fair_value = valuation.fair_value_per_share,
        "DCF valuation complete"
    );

    let summary = DcfSummary::new(args.ticker.clone(), &valuation);

    match format {
        OutputFormat::Table => {
            print_header("DCF Valuation");
            print_output(&summary_rows(&summary), format)?;
            if args.breakdown {
                print_header("Projected Cash Flows");
                let rows: Vec<CashFlowRow> = valuation.projected.iter().map(Into::into).collect();
                print_output(&rows, format)?;
            }
        }
        OutputFormat::Json => {
            let report = DcfReport {
                summary: &summary,
                projected: args.breakdown.then_some(valuation.projected.as_slice()),
            };
            print_record(&report, format)?;
        }
        OutputFormat::Csv => {
            if args.breakdown {
                let rows: Vec<CashFlowRow> = valuation.projected.iter().map(Into::into).collect();
                print_output(&rows, format)?;
            } else {
                print_record(&summary, format)?;
            }
        }
        OutputFormat::Minimal => {
            println!("{:.4}", valuation.fair_value_per_share);
        }
    }

    Ok(())
}

fn summary_rows(summary: &DcfSummary) -> Vec<KeyValue> {
    let mut rows = Vec::new();
    if let Some(ref ticker) = summary.ticker {
        rows.push(KeyValue::new("Ticker", ticker.as_str()));
    }
    rows.push(KeyValue::from_percent("Discount Rate", summary.discount_rate));
    rows.push(KeyValue::from_percent("Growth (Years 1-5)", summary.short_term_growth));
    rows.push(KeyValue::from_percent("Growth (Years 6-10)", summary.medium_term_growth));
    rows.push(KeyValue::from_percent("Growth (Years 11-20)", summary.long_term_growth));
    rows.push(KeyValue::from_amount("PV of Cash Flows", summary.pv_of_cash_flows));
    rows.push(KeyValue::from_amount("Net Cash", summary.net_cash));
    rows.push(KeyValue::from_amount("Equity Value", summary.equity_value));
    rows.push(KeyValue::from_amount("Shares Outstanding", summary.shares_outstanding));
    rows.push(KeyValue::from_f64("Fair Value / Share", summary.fair_value_per_share, 2));
    rows
}

fn inputs_from_file(
    args: &DcfArgs,
    ticker: &str,
    data: &Path,
    config: &ValuationConfig,
) -> Result<(ValuationInputs, GrowthSchedule)> {
    let as_of = date_or_today(args.as_of.as_deref())?;
    let source = JsonCompanySource::load(data, config.wacc.clone(), config.dcf)?;

    let mut inputs = source.fetch_fundamentals(ticker, as_of)?;
    if let Some(rate) = args.discount_rate {
        inputs = inputs.with_discount_rate(rate);
    }

    let schedule = match args.short_growth {
        Some(short) => schedule_from_args(args, short, config)?,
        None => {
            let from_file = source.growth_schedule(ticker, as_of)?;
            GrowthSchedule::new(
                from_file.short_term(),
                args.medium_growth.unwrap_or(from_file.medium_term()),
                args.long_growth.unwrap_or(from_file.long_term()),
            )?
        }
    };

    Ok((inputs, schedule))
}

fn inputs_from_args(
    args: &DcfArgs,
    config: &ValuationConfig,
) -> Result<(ValuationInputs, GrowthSchedule)> {
    let required = |value: Option<f64>, flag: &str| {
        value.ok_or_else(|| CliError::MissingArgument(flag.to_string()))
    };

    let discount_rate = match (args.discount_rate, args.beta) {
        (Some(rate), _) => rate,
        (None, Some(beta)) => config.wacc.lookup(beta)?,
        (None, None) => {
            return Err(CliError::MissingArgument("--discount-rate or --beta".to_string()).into())
        }
    };

    let inputs = ValuationInputs::new(
        required(args.fcf, "--fcf")?,
        required(args.cash, "--cash")?,
        required(args.debt, "--debt")?,
        required(args.shares, "--shares")?,
        discount_rate,
    );
    let short = required(args.short_growth, "--short-growth")?;

    Ok((inputs, schedule_from_args(args, short, config)?))
}

fn schedule_from_args(
    args: &DcfArgs,
    short: f64,
    config: &ValuationConfig,
) -> Result<GrowthSchedule> {
    let convention = config.dcf.schedule_for(short)?;
    Ok(GrowthSchedule::new(
        short,
        args.medium_growth.unwrap_or(convention.medium_term()),
        args.long_growth.unwrap_or(convention.long_term()),
    )?)
}
