//! CLI command implementations.

pub mod config;
pub mod dcf;
pub mod option;
pub mod wacc;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use dcf::DcfArgs;
pub use option::OptionArgs;
pub use wacc::WaccArgs;

use fairval_core::Date;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses an optional date, defaulting to today.
pub fn date_or_today(s: Option<&str>) -> CliResult<Date> {
    s.map_or_else(|| Ok(Date::today()), parse_date)
}
