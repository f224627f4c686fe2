//! SQLite ledger access for Tally.
//!
//! This crate provides:
//! - [`Ledger`], a read-only handle that aggregates postings per account
//!   and builds the named reports
//! - The ledger schema DDL, for fixtures and local databases

pub mod error;
pub mod ledger;
pub mod schema;

pub use error::LedgerError;
pub use ledger::Ledger;
