//! fairval CLI - Command-line interface for equity valuation.
//!
//! # Usage
//!
//! ```bash
//! # Fair value from explicit inputs
//! fairval dcf --fcf 71706e6 --cash 93025e6 --debt 112723e6 --shares 17250e6 \
//!     --beta 1.31 --short-growth 0.1246
//!
//! # Fair value from a company data file
//! fairval dcf --ticker AAPL --data companies.json --breakdown
//!
//! # Price a European option with Greeks
//! fairval option --spot 42 --strike 40 --expiry-years 0.5 --vol 0.2 --rate 0.1 --type put
//!
//! # Discount rate for a beta
//! fairval wacc --beta 1.31
//! ```

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fairval_config::ValuationConfig;

mod cli;
mod commands;
mod error;
mod output;
mod source;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let format = cli.format;
    let explicit_config = cli.config.is_some();
    let config_path = match cli.config {
        Some(path) => path,
        None => commands::config::default_config_path()?,
    };

    // Execute command
    match cli.command {
        Commands::Dcf(args) => {
            let config = load_config(&config_path, explicit_config)?;
            commands::dcf::execute(args, &config, format)?;
        }
        Commands::Options(args) => {
            let config = load_config(&config_path, explicit_config)?;
            commands::option::execute(args, &config, format)?;
        }
        Commands::Wacc(args) => {
            let config = load_config(&config_path, explicit_config)?;
            commands::wacc::execute(args, &config, format)?;
        }
        Commands::Config(args) => commands::config::execute(args, &config_path, format)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable. `RUST_LOG` wins over
/// the verbosity flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// An explicitly named config file must exist; the default location may not.
fn load_config(path: &Path, explicit: bool) -> Result<ValuationConfig> {
    let config = if explicit {
        ValuationConfig::from_file(path)?
    } else {
        ValuationConfig::load_or_default(path)?
    };
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}
