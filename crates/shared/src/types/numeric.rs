//! Numeric normalization into exact decimals.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount read from the ledger or an export passes through
//! [`to_decimal`] and is rendered back with [`format_decimal`].

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Errors raised when a value cannot be represented as an exact decimal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Text that is not a decimal literal.
    #[error("Cannot convert {0:?} to a decimal")]
    InvalidText(String),

    /// NaN or infinity.
    #[error("Cannot convert non-finite value {0} to a decimal")]
    NonFinite(String),

    /// A finite number outside the range `Decimal` can hold.
    #[error("Value {0} is outside the supported decimal range")]
    OutOfRange(String),

    /// A value shape with no numeric meaning (e.g. a binary blob).
    #[error("Cannot convert a {0} value to a decimal")]
    Unsupported(String),
}

/// A numeric value in any of the representations the ledger can hand back.
///
/// SQLite columns declared `NUMERIC` come back as integers, reals, text or
/// null depending on what was stored, so every shape is accepted here and
/// normalized by [`to_decimal`].
#[derive(Debug, Clone, Copy)]
pub enum NumericInput<'a> {
    /// Already an exact decimal.
    Decimal(Decimal),
    /// Missing value (SQL `NULL`).
    Absent,
    /// Integer value.
    Int(i64),
    /// Binary floating-point value.
    Float(f64),
    /// Textual decimal literal.
    Text(&'a str),
}

impl From<Decimal> for NumericInput<'_> {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<i64> for NumericInput<'_> {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for NumericInput<'_> {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for NumericInput<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<'a> From<&'a str> for NumericInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a, T> From<Option<T>> for NumericInput<'a>
where
    T: Into<NumericInput<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Converts any supported numeric representation into an exact decimal.
///
/// - Absent values become zero.
/// - Floats go through their shortest round-trip text, so `0.1` becomes
///   exactly `0.1` rather than the nearest binary fraction.
/// - Text is trimmed; empty text becomes zero.
///
/// # Errors
///
/// Returns [`ConversionError`] for unparseable text, non-finite floats and
/// values outside the decimal range.
pub fn to_decimal<'a>(value: impl Into<NumericInput<'a>>) -> Result<Decimal, ConversionError> {
    match value.into() {
        NumericInput::Decimal(value) => Ok(value),
        NumericInput::Absent => Ok(Decimal::ZERO),
        NumericInput::Int(value) => Ok(Decimal::from(value)),
        NumericInput::Float(value) => float_to_decimal(value),
        NumericInput::Text(text) => text_to_decimal(text),
    }
}

fn float_to_decimal(value: f64) -> Result<Decimal, ConversionError> {
    if !value.is_finite() {
        return Err(ConversionError::NonFinite(value.to_string()));
    }

    // `Display` for f64 prints the shortest digits that round-trip, never in
    // exponent form.
    let text = value.to_string();
    Decimal::from_str(&text).map_err(|_| ConversionError::OutOfRange(text))
}

fn text_to_decimal(text: &str) -> Result<Decimal, ConversionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| ConversionError::InvalidText(trimmed.to_string()))
}

/// Renders a decimal as plain text for exports.
///
/// Rounds half-up (midpoint away from zero) to `places` when given, strips
/// trailing fractional zeros, and renders a zero value as `"0"` unless
/// `zero_as_blank` is set. An absent value renders as an empty string.
#[must_use]
pub fn format_decimal(value: Option<Decimal>, places: Option<u32>, zero_as_blank: bool) -> String {
    let Some(value) = value else {
        return String::new();
    };

    if zero_as_blank && value.is_zero() {
        return String::new();
    }

    let rounded = match places {
        Some(dp) => value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        None => value,
    };

    if rounded.is_zero() {
        return "0".to_string();
    }

    rounded.normalize().to_string()
}

#[cfg(test)]
#[path = "numeric_tests.rs"]
mod tests;
