//! WACC command implementation.
//!
//! Looks up a beta in the configured discount rate table, or prints the
//! table itself.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use fairval_config::ValuationConfig;

use crate::cli::OutputFormat;
use crate::output::{format_percent, print_header, print_output, print_record, KeyValue};

/// Arguments for the wacc command.
#[derive(Args, Debug)]
pub struct WaccArgs {
    /// Equity beta. Without it the whole table is shown.
    #[arg(long, allow_negative_numbers = true)]
    pub beta: Option<f64>,
}

/// One band of the table for display.
#[derive(Debug, Serialize, Tabled)]
struct BandRow {
    #[tabled(rename = "Beta")]
    beta: String,
    #[tabled(rename = "Discount Rate")]
    rate: String,
}

#[derive(Debug, Serialize)]
struct Lookup {
    beta: f64,
    discount_rate: f64,
}

/// Execute the wacc command.
pub fn execute(args: WaccArgs, config: &ValuationConfig, format: OutputFormat) -> Result<()> {
    let table = &config.wacc;

    let Some(beta) = args.beta else {
        let mut rows = Vec::with_capacity(table.bands.len() + 1);
        let mut lower: Option<f64> = None;
        for band in &table.bands {
            let beta = match lower {
                Some(low) => format!("{low:.2} to < {:.2}", band.beta_below),
                None => format!("< {:.2}", band.beta_below),
            };
            rows.push(BandRow {
                beta,
                rate: format_percent(band.rate),
            });
            lower = Some(band.beta_below);
        }
        rows.push(BandRow {
            beta: lower.map_or_else(|| "any".to_string(), |low| format!(">= {low:.2}")),
            rate: format_percent(table.ceiling_rate),
        });

        if format == OutputFormat::Table {
            print_header("WACC Table");
        }
        print_output(&rows, format)?;
        return Ok(());
    };

    let discount_rate = table.lookup(beta)?;
    tracing::debug!(beta, discount_rate, "WACC lookup");

    match format {
        OutputFormat::Table => {
            print_header("Discount Rate");
            print_output(
                &[
                    KeyValue::from_f64("Beta", beta, 2),
                    KeyValue::from_percent("Discount Rate", discount_rate),
                ],
                format,
            )?;
        }
        OutputFormat::Json | OutputFormat::Csv => {
            print_record(&Lookup { beta, discount_rate }, format)?;
        }
        OutputFormat::Minimal => println!("{discount_rate}"),
    }

    Ok(())
}
