//! Report generation facade for Tally.
//!
//! Opens the ledger, runs one of the named reports, optionally writes the
//! rows to CSV, and returns them. Errors from the ledger and the export
//! codec are passed through unchanged.

use std::path::{Path, PathBuf};

use tally_core::export::{ExportError, read_report, write_report};
use tally_db::{Ledger, LedgerError};
use thiserror::Error;
use tracing::info;

pub use tally_core::export::ExportOptions;
pub use tally_core::reports::{
    AccountType, ProfitAndLossSummary, ReportKind, ReportOptions, ReportRow, TrialBalanceOptions,
};
pub use tally_shared::types::DateInput;

/// Errors surfaced by the facade.
#[derive(Debug, Error)]
pub enum ReportingError {
    /// Ledger could not be opened or aggregated.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Export could not be written.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Where and how to write a generated report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTarget {
    /// CSV file to create or replace.
    pub path: PathBuf,
    /// Amount rendering options.
    pub options: ExportOptions,
}

impl ExportTarget {
    /// Creates an export target.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, options: ExportOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }
}

/// Generates the Profit & Loss report for `[start, end]`.
///
/// # Errors
///
/// Returns an error if the ledger is missing, a date is invalid, the query
/// fails, or the export cannot be written.
pub fn generate_profit_and_loss(
    ledger_path: impl AsRef<Path>,
    start: Option<&DateInput>,
    end: Option<&DateInput>,
    export: Option<&ExportTarget>,
) -> Result<Vec<ReportRow>, ReportingError> {
    let ledger = Ledger::open(ledger_path)?;
    let rows = ledger.profit_and_loss(start, end, ReportOptions::default())?;
    finish(ReportKind::ProfitAndLoss, rows, export)
}

/// Generates the Balance Sheet as of `as_of`.
///
/// # Errors
///
/// Returns an error if the ledger is missing, the date is invalid, the query
/// fails, or the export cannot be written.
pub fn generate_balance_sheet(
    ledger_path: impl AsRef<Path>,
    as_of: Option<&DateInput>,
    export: Option<&ExportTarget>,
) -> Result<Vec<ReportRow>, ReportingError> {
    let ledger = Ledger::open(ledger_path)?;
    let rows = ledger.balance_sheet(as_of, ReportOptions::default())?;
    finish(ReportKind::BalanceSheet, rows, export)
}

/// Generates the Trial Balance for `[start, end]`.
///
/// `account_types` selects categories; `None` covers all five.
///
/// # Errors
///
/// Returns an error if the ledger is missing, a date is invalid, the query
/// fails, or the export cannot be written.
pub fn generate_trial_balance(
    ledger_path: impl AsRef<Path>,
    start: Option<&DateInput>,
    end: Option<&DateInput>,
    account_types: Option<&[AccountType]>,
    export: Option<&ExportTarget>,
) -> Result<Vec<ReportRow>, ReportingError> {
    let ledger = Ledger::open(ledger_path)?;
    let options = TrialBalanceOptions {
        include_zero: true,
        account_types: account_types.map(<[AccountType]>::to_vec),
    };
    let rows = ledger.trial_balance(start, end, &options)?;
    finish(ReportKind::TrialBalance, rows, export)
}

fn finish(
    kind: ReportKind,
    rows: Vec<ReportRow>,
    export: Option<&ExportTarget>,
) -> Result<Vec<ReportRow>, ReportingError> {
    if let Some(target) = export {
        write_report(&rows, &target.path, target.options)?;
        info!(report = %kind, path = %target.path.display(), rows = rows.len(), "Exported report");
    }
    Ok(rows)
}

/// Loads a previously exported Profit & Loss report.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed.
pub fn load_profit_and_loss_report(path: impl AsRef<Path>) -> Result<Vec<ReportRow>, ExportError> {
    read_report(path)
}

/// Loads a previously exported Balance Sheet.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed.
pub fn load_balance_sheet_report(path: impl AsRef<Path>) -> Result<Vec<ReportRow>, ExportError> {
    read_report(path)
}

/// Loads a previously exported Trial Balance.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed.
pub fn load_trial_balance_report(path: impl AsRef<Path>) -> Result<Vec<ReportRow>, ExportError> {
    read_report(path)
}
