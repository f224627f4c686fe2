//! Reading and writing report rows as CSV.

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use tally_shared::config::ExportConfig;
use tally_shared::types::{format_decimal, to_decimal};
use tracing::debug;

use super::error::ExportError;
use crate::reports::{AccountType, ReportRow};

/// Canonical export header, in column order.
pub const HEADER: [&str; 4] = ["type", "code", "name", "amount"];

/// How amounts are rendered in an export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Round amounts half-up to this many decimal places.
    pub decimal_places: Option<u32>,
    /// Write zero amounts as empty cells.
    pub zero_as_blank: bool,
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            decimal_places: config.decimal_places,
            zero_as_blank: config.zero_as_blank,
        }
    }
}

/// Column positions located from a header record.
struct Columns {
    account_type: usize,
    code: usize,
    name: usize,
    amount: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, ExportError> {
        let find = |column: &str| headers.iter().position(|h| h.trim() == column);
        let located = HEADER.map(find);

        match located {
            [Some(account_type), Some(code), Some(name), Some(amount)] => Ok(Self {
                account_type,
                code,
                name,
                amount,
            }),
            _ => Err(ExportError::Schema {
                missing: HEADER
                    .iter()
                    .zip(located)
                    .filter(|(_, position)| position.is_none())
                    .map(|(column, _)| (*column).to_string())
                    .collect(),
            }),
        }
    }
}

/// Loads report rows from a CSV export.
///
/// Columns are located by header name, so extra columns and a different
/// column order are accepted. A blank amount reads as zero.
///
/// # Errors
///
/// Returns [`ExportError::NotFound`] if the file does not exist,
/// [`ExportError::Schema`] naming every missing required column, or a
/// per-line error for an unreadable type or amount.
pub fn read_report(path: impl AsRef<Path>) -> Result<Vec<ReportRow>, ExportError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ExportError::NotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let columns = Columns::locate(reader.headers()?)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        let cell = |index: usize| record.get(index).unwrap_or("");

        let type_text = cell(columns.account_type);
        let account_type =
            AccountType::from_str(type_text).map_err(|_| ExportError::InvalidType {
                line,
                value: type_text.to_string(),
            })?;
        let amount = to_decimal(cell(columns.amount))
            .map_err(|source| ExportError::Conversion { line, source })?;

        rows.push(ReportRow::new(
            account_type,
            cell(columns.code),
            cell(columns.name),
            amount,
        ));
    }

    debug!(path = %path.display(), rows = rows.len(), "Read report export");
    Ok(rows)
}

/// Writes report rows as CSV with the canonical header to any writer.
///
/// Returns the number of rows written.
///
/// # Errors
///
/// Returns an error if a record cannot be encoded or the output fails.
pub fn write_rows<'a, W: io::Write>(
    output: W,
    rows: impl IntoIterator<Item = &'a ReportRow>,
    options: ExportOptions,
) -> Result<usize, ExportError> {
    let mut writer = csv::Writer::from_writer(output);
    writer.write_record(HEADER)?;

    let mut written = 0usize;
    for row in rows {
        let amount = format_decimal(Some(row.amount), options.decimal_places, options.zero_as_blank);
        writer.write_record([
            row.account_type.as_str(),
            row.code.as_str(),
            row.name.as_str(),
            amount.as_str(),
        ])?;
        written += 1;
    }
    writer.flush()?;

    Ok(written)
}

/// Writes report rows to a CSV file with the canonical header.
///
/// Parent directories are created as needed and an existing file is
/// replaced.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_report<'a>(
    rows: impl IntoIterator<Item = &'a ReportRow>,
    path: impl AsRef<Path>,
    options: ExportOptions,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let written = write_rows(fs::File::create(path)?, rows, options)?;

    debug!(path = %path.display(), rows = written, "Wrote report export");
    Ok(())
}
