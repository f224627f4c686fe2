//! Date bound normalization for report filters.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// A date value that cannot be interpreted as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported date value: {value:?}")]
pub struct InvalidDateError {
    /// The rejected input, as given.
    pub value: String,
}

/// A report date bound in one of the accepted shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// Calendar date.
    Date(NaiveDate),
    /// Date and time; only the date part is used.
    DateTime(NaiveDateTime),
    /// ISO-8601 text (`YYYY-MM-DD`, optionally with a time part).
    Text(String),
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

impl DateInput {
    /// Resolves the input to a calendar date.
    ///
    /// Blank text means "no bound" and resolves to `None`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDateError`] if text is neither a date nor a date-time.
    pub fn to_date(&self) -> Result<Option<NaiveDate>, InvalidDateError> {
        match self {
            Self::Date(date) => Ok(Some(*date)),
            Self::DateTime(datetime) => Ok(Some(datetime.date())),
            Self::Text(text) => parse_text(text),
        }
    }
}

fn parse_text(text: &str) -> Result<Option<NaiveDate>, InvalidDateError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(Some(date));
    }

    if let Some(datetime) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
    {
        return Ok(Some(datetime.date()));
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|datetime| Some(datetime.date_naive()))
        .map_err(|_| InvalidDateError {
            value: text.to_string(),
        })
}

/// Normalizes an optional date bound; `None` means unbounded.
///
/// # Errors
///
/// Returns [`InvalidDateError`] if the bound cannot be parsed.
pub fn normalize_date(value: Option<&DateInput>) -> Result<Option<NaiveDate>, InvalidDateError> {
    value.map_or(Ok(None), DateInput::to_date)
}
