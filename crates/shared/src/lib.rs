//! Shared types and configuration for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Numeric normalization into exact decimals and canonical decimal text
//! - Date bound normalization for report filters
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
pub use types::{ConversionError, DateInput, InvalidDateError, NumericInput};
