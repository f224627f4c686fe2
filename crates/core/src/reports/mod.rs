//! Financial report generation.
//!
//! This module turns per-account debit/credit aggregates into report rows:
//! - Profit & Loss
//! - Balance Sheet
//! - Trial Balance
//!
//! It also provides a presentation summary of a Profit & Loss report.

pub mod error;
pub mod service;
pub mod summary;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use summary::{ProfitAndLossSummary, SummaryLine};
pub use types::*;
