//! Export error types.

use std::path::PathBuf;

use tally_shared::types::ConversionError;
use thiserror::Error;

/// Errors that can occur while reading or writing report exports.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export file does not exist.
    #[error("Report not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Header lacks one or more required columns.
    #[error("Report is missing columns: {}", .missing.join(", "))]
    Schema {
        /// Missing column names, in canonical order.
        missing: Vec<String>,
    },

    /// Amount cell is not a decimal.
    #[error("Invalid amount on line {line}: {source}")]
    Conversion {
        /// 1-based line number in the file.
        line: u64,
        /// Underlying conversion failure.
        #[source]
        source: ConversionError,
    },

    /// Type cell is not a known account category.
    #[error("Invalid account type on line {line}: {value:?}")]
    InvalidType {
        /// 1-based line number in the file.
        line: u64,
        /// The rejected cell text.
        value: String,
    },

    /// CSV encoding or decoding failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
