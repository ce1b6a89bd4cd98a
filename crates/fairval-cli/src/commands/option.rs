//! Option command implementation.
//!
//! Prices a European option with Black-Scholes, reports its Greeks and the
//! put-call parity price of the opposite side.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use fairval_analytics::{BlackScholesEngine, Greeks};
use fairval_config::ValuationConfig;
use fairval_core::prelude::*;

use crate::cli::OutputFormat;
use crate::commands::{date_or_today, parse_date};
use crate::error::CliError;
use crate::output::{print_header, print_output, print_record, KeyValue};
use crate::source::JsonCompanySource;

/// Arguments for the option command.
#[derive(Args, Debug)]
pub struct OptionArgs {
    /// Ticker of the underlying to look up in the data file
    #[arg(long, requires = "data")]
    pub ticker: Option<String>,

    /// JSON company data file supplying spot, volatility and dividend yield
    #[arg(long, requires = "ticker")]
    pub data: Option<PathBuf>,

    /// Spot price of the underlying
    #[arg(long)]
    pub spot: Option<f64>,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(long, group = "expiry")]
    pub expiry_years: Option<f64>,

    /// Expiry date (YYYY-MM-DD)
    #[arg(long, group = "expiry")]
    pub expiry_date: Option<String>,

    /// Pricing date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub pricing_date: Option<String>,

    /// Annualized volatility as a fraction (e.g. 0.2 for 20%)
    #[arg(long, alias = "volatility")]
    pub vol: Option<f64>,

    /// Continuously compounded dividend yield
    #[arg(long)]
    pub dividend_yield: Option<f64>,

    /// Risk-free rate. Defaults to the configured rate.
    #[arg(long, allow_negative_numbers = true)]
    pub rate: Option<f64>,

    /// Option type: call or put
    #[arg(long = "type", default_value = "call")]
    pub option_type: String,

    /// Exercise style: european or american
    #[arg(long, default_value = "european")]
    pub style: String,

    /// Observed market price of this option, for the parity-implied price of
    /// the opposite side
    #[arg(long)]
    pub market_price: Option<f64>,
}

/// Price, Greeks and parity figures of one option.
#[derive(Debug, Serialize)]
struct OptionReport {
    option_type: OptionType,
    option_style: OptionStyle,
    spot_price: f64,
    strike: f64,
    time_to_expiry: f64,
    volatility: f64,
    dividend_yield: f64,
    risk_free_rate: f64,
    d1: f64,
    d2: f64,
    price: f64,
    delta: f64,
    gamma: f64,
    theta: f64,
    vega: f64,
    rho: f64,
    parity_price: f64,
    market_price: Option<f64>,
    market_parity_price: Option<f64>,
}

/// Execute the option command.
pub fn execute(args: OptionArgs, config: &ValuationConfig, format: OutputFormat) -> Result<()> {
    let option_type: OptionType = args.option_type.parse()?;
    let option_style: OptionStyle = args.style.parse()?;
    let pricing_date = date_or_today(args.pricing_date.as_deref())?;

    let underlying = resolve_underlying(&args, config, pricing_date)?;
    let context = match args.rate {
        Some(rate) => PricingContext::new(pricing_date, rate),
        None => config.options.pricing_context(pricing_date),
    };
    let rate = context.risk_free_rate;
    let engine = BlackScholesEngine::new(context);

    let option = match (args.expiry_years, &args.expiry_date) {
        (Some(years), _) => {
            FinancialOption::new(&underlying, args.strike, years, option_type, option_style)
        }
        (None, Some(date)) => FinancialOption::with_expiry_date(
            &underlying,
            args.strike,
            pricing_date,
            parse_date(date)?,
            option_type,
            option_style,
        )?,
        (None, None) => {
            return Err(
                CliError::MissingArgument("--expiry-years or --expiry-date".to_string()).into(),
            )
        }
    };

    let greeks = engine.greeks(&option)?;
    let (d1, d2) = engine.d1_d2(&option)?;
    let parity_price = engine.parity_price(&option, greeks.price)?;
    let market_parity_price = args
        .market_price
        .map(|observed| engine.parity_price(&option, observed))
        .transpose()?;

    tracing::info!(
        %option_type,
        strike = option.strike,
        time_to_expiry = option.time_to_expiry,
        price = greeks.price,
        "option priced"
    );

    let report = OptionReport {
        option_type,
        option_style,
        spot_price: underlying.spot_price,
        strike: option.strike,
        time_to_expiry: option.time_to_expiry,
        volatility: underlying.volatility,
        dividend_yield: underlying.dividend_yield,
        risk_free_rate: rate,
        d1,
        d2,
        price: greeks.price,
        delta: greeks.delta,
        gamma: greeks.gamma,
        theta: greeks.theta,
        vega: greeks.vega,
        rho: greeks.rho,
        parity_price,
        market_price: args.market_price,
        market_parity_price,
    };

    match format {
        OutputFormat::Table => {
            print_header("Option Valuation");
            print_output(&report_rows(&report, &greeks), format)?;
        }
        OutputFormat::Json | OutputFormat::Csv => print_record(&report, format)?,
        OutputFormat::Minimal => println!("{:.6}", report.price),
    }

    Ok(())
}

fn resolve_underlying(
    args: &OptionArgs,
    config: &ValuationConfig,
    pricing_date: Date,
) -> Result<Underlying> {
    let mut underlying = match (&args.ticker, &args.data) {
        (Some(ticker), Some(data)) => {
            JsonCompanySource::load(data, config.wacc.clone(), config.dcf)?
                .fetch_underlying(ticker, pricing_date)?
        }
        _ => {
            let spot = args
                .spot
                .ok_or_else(|| CliError::MissingArgument("--spot".to_string()))?;
            let vol = args
                .vol
                .ok_or_else(|| CliError::MissingArgument("--vol".to_string()))?;
            Underlying::new(spot, vol)
        }
    };

    // Explicit flags override file values.
    if let Some(spot) = args.spot {
        underlying.spot_price = spot;
    }
    if let Some(vol) = args.vol {
        underlying.volatility = vol;
    }
    if let Some(q) = args.dividend_yield {
        underlying.dividend_yield = q;
    }
    Ok(underlying)
}

fn report_rows(report: &OptionReport, greeks: &Greeks) -> Vec<KeyValue> {
    let side = |t: OptionType| match t {
        OptionType::Call => "Call",
        OptionType::Put => "Put",
    };
    let this_side = side(report.option_type);
    let other_side = side(report.option_type.opposite());

    let mut rows = vec![
        KeyValue::new(
            "Option",
            format!("{} {this_side}", capitalize(&report.option_style.to_string())),
        ),
        KeyValue::from_f64("Spot", report.spot_price, 4),
        KeyValue::from_f64("Strike", report.strike, 4),
        KeyValue::from_f64("Time to Expiry (years)", report.time_to_expiry, 6),
        KeyValue::from_percent("Volatility", report.volatility),
        KeyValue::from_percent("Dividend Yield", report.dividend_yield),
        KeyValue::from_percent("Risk-Free Rate", report.risk_free_rate),
        KeyValue::new("", ""),
        KeyValue::from_f64("d1", report.d1, 6),
        KeyValue::from_f64("d2", report.d2, 6),
        KeyValue::from_f64("Price", greeks.price, 6),
        KeyValue::from_f64("Delta", greeks.delta, 6),
        KeyValue::from_f64("Gamma", greeks.gamma, 6),
        KeyValue::from_f64("Theta (annual)", greeks.theta, 6),
        KeyValue::from_f64("Theta (per day)", greeks.theta_per_day(), 6),
        KeyValue::from_f64("Vega", greeks.vega, 6),
        KeyValue::from_f64("Vega (per vol point)", greeks.vega_per_vol_point(), 6),
        KeyValue::from_f64("Rho", greeks.rho, 6),
        KeyValue::from_f64("Rho (per rate point)", greeks.rho_per_rate_point(), 6),
        KeyValue::new("", ""),
        KeyValue::from_f64(format!("Parity {other_side} Price"), report.parity_price, 6),
    ];

    if let (Some(observed), Some(implied)) = (report.market_price, report.market_parity_price) {
        rows.push(KeyValue::from_f64(format!("Market {this_side} Price"), observed, 6));
        rows.push(KeyValue::from_f64(
            format!("Parity {other_side} from Market"),
            implied,
            6,
        ));
    }

    rows
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
