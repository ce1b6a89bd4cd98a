//! Config command implementation.
//!
//! Shows, locates and initializes the valuation configuration file.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};

use fairval_config::ValuationConfig;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info, print_output, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show configuration file location
    Path,

    /// Write the default configuration to the config file
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Default config file path.
pub fn default_config_path() -> CliResult<PathBuf> {
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or(CliError::NoConfigDir)?;
    Ok(home.join("fairval").join("config.toml"))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, path: &Path, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(path, format),
        ConfigCommand::Path => execute_path(path),
        ConfigCommand::Init(init_args) => execute_init(init_args, path),
    }
}

/// Show the effective configuration.
fn execute_show(path: &Path, format: OutputFormat) -> Result<()> {
    if !path.exists() {
        print_warning(&format!("{} not found, showing defaults", path.display()));
    }
    let config = ValuationConfig::load_or_default(path)?;

    match format {
        OutputFormat::Table => {
            let mut rows = vec![
                KeyValue::from_percent("dcf.long_term_growth", config.dcf.long_term_growth),
                KeyValue::from_f64("dcf.medium_term_ratio", config.dcf.medium_term_ratio, 4),
                KeyValue::from_percent("options.risk_free_rate", config.options.risk_free_rate),
            ];
            for band in &config.wacc.bands {
                rows.push(KeyValue::from_percent(
                    format!("wacc: beta < {:.2}", band.beta_below),
                    band.rate,
                ));
            }
            rows.push(KeyValue::from_percent("wacc: ceiling", config.wacc.ceiling_rate));

            print_header("Current Configuration");
            print_output(&rows, format)?;
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Csv | OutputFormat::Minimal => print!("{}", config.to_toml_string()?),
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(path: &Path) -> Result<()> {
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Write the default configuration.
fn execute_init(args: InitArgs, path: &Path) -> Result<()> {
    if path.exists() && !args.force {
        return Err(CliError::AlreadyExists(path.display().to_string()).into());
    }
    ValuationConfig::default().save(path)?;
    print_success(&format!("Wrote default configuration to {}", path.display()));
    Ok(())
}
