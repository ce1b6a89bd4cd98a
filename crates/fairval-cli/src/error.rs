//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// A company data file could not be read or parsed.
    #[error("Data file {path}: {reason}")]
    DataFile {
        /// Path of the data file.
        path: String,
        /// What went wrong.
        reason: String,
    },

    /// Refusing to overwrite an existing file.
    #[error("{0} already exists (use --force to overwrite)")]
    AlreadyExists(String),

    /// Configuration directory could not be determined.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
