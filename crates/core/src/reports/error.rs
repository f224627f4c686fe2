//! Report error types.

use thiserror::Error;

/// Errors that can occur while interpreting report data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Account category outside the closed set.
    #[error("Unknown account type: {0}")]
    UnknownAccountType(String),
}
