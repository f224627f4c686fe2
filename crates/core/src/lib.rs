//! Core report logic for Tally.
//!
//! This crate contains pure report logic with ZERO database dependencies.
//! Account categories, sign conventions, row ordering and the export codec
//! live here.
//!
//! # Modules
//!
//! - `reports` - Report rows, sign conventions, ordering and summaries
//! - `export` - CSV export and import of report rows

pub mod export;
pub mod reports;
