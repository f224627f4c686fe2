//! Ledger error types.

use std::path::PathBuf;

use tally_core::reports::ReportError;
use tally_shared::types::{ConversionError, InvalidDateError};
use thiserror::Error;

/// Errors that can occur while reading the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Ledger database file does not exist.
    #[error("Ledger database not found: {}", .0.display())]
    LedgerNotFound(PathBuf),

    /// A date bound could not be parsed.
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),

    /// An aggregated amount could not be converted to a decimal.
    #[error("Invalid amount for account {code}: {source}")]
    Conversion {
        /// Code of the account whose sum failed to convert.
        code: String,
        /// Underlying conversion failure.
        #[source]
        source: ConversionError,
    },

    /// An account row carries a category outside the closed set.
    #[error(transparent)]
    UnknownAccountType(#[from] ReportError),

    /// SQLite failure.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}
