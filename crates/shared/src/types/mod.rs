//! Common types used across the application.

pub mod date;
pub mod numeric;

pub use date::{DateInput, InvalidDateError, normalize_date};
pub use numeric::{ConversionError, NumericInput, format_decimal, to_decimal};
