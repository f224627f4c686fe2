//! Report aggregation over the SQLite ledger.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, params_from_iter};
use rust_decimal::Decimal;
use tally_core::reports::{
    AccountAggregate, AccountType, ReportKind, ReportOptions, ReportRow, ReportService,
    TrialBalanceOptions,
};
use tally_shared::types::{ConversionError, DateInput, NumericInput, normalize_date, to_decimal};
use tracing::{debug, warn};

use crate::error::LedgerError;

/// Per-account debit and credit amounts for postings whose journal falls
/// inside the date bounds, joined with [`AMOUNT_SEPARATOR`]. SQLite stores
/// fractional `NUMERIC` values as reals, so amounts are listed rather than
/// summed and each one is converted from its shortest text. Accounts without
/// matching postings still appear (left join) with `NULL` lists.
/// `?1`/`?2` are the optional ISO start/end dates.
const AGGREGATE_SQL: &str = "
    WITH filtered_postings AS (
        SELECT p.account_id, p.debit, p.credit
        FROM postings p
        JOIN journals j ON j.id = p.journal_id
        WHERE (?1 IS NULL OR j.date >= ?1)
          AND (?2 IS NULL OR j.date <= ?2)
    )
    SELECT a.id,
           a.type,
           a.code,
           a.name,
           group_concat(fp.debit, char(31)),
           group_concat(fp.credit, char(31))
    FROM accounts a
    LEFT JOIN filtered_postings fp ON fp.account_id = a.id
    WHERE a.type IN ({types})
    GROUP BY a.id
    ORDER BY a.code
";

/// Separates the amounts `group_concat` lists for one account (`char(31)`).
const AMOUNT_SEPARATOR: char = '\u{1f}';

/// One result row of the aggregation query, as stored.
struct AggregateRow {
    account_id: i64,
    account_type: String,
    code: String,
    name: String,
    debit: Value,
    credit: Value,
}

impl AggregateRow {
    fn from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            account_id: row.get(0)?,
            account_type: row.get(1)?,
            code: row.get(2)?,
            name: row.get(3)?,
            debit: row.get(4)?,
            credit: row.get(5)?,
        })
    }
}

impl TryFrom<AggregateRow> for AccountAggregate {
    type Error = LedgerError;

    fn try_from(row: AggregateRow) -> Result<Self, Self::Error> {
        let total_debit = fold_amounts(&row.debit, &row.code)?;
        let total_credit = fold_amounts(&row.credit, &row.code)?;

        Ok(Self {
            account_id: row.account_id,
            account_type: AccountType::from_str(&row.account_type)?,
            code: row.code,
            name: row.name,
            total_debit,
            total_credit,
        })
    }
}

/// Sums the amounts listed for one account in exact decimal arithmetic.
///
/// The list comes back as text, or `NULL` when the account has no postings
/// in range. A bare integer or real is converted directly.
fn fold_amounts(value: &Value, code: &str) -> Result<Decimal, LedgerError> {
    let conversion = |source: ConversionError| LedgerError::Conversion {
        code: code.to_string(),
        source,
    };

    match value {
        Value::Null => Ok(Decimal::ZERO),
        Value::Integer(n) => to_decimal(NumericInput::Int(*n)).map_err(conversion),
        Value::Real(f) => to_decimal(NumericInput::Float(*f)).map_err(conversion),
        Value::Text(list) => list.split(AMOUNT_SEPARATOR).try_fold(Decimal::ZERO, |total, part| {
            let amount = to_decimal(part).map_err(conversion)?;
            total
                .checked_add(amount)
                .ok_or_else(|| conversion(ConversionError::OutOfRange(list.clone())))
        }),
        Value::Blob(_) => Err(conversion(ConversionError::Unsupported("blob".to_string()))),
    }
}

fn iso(date: Option<NaiveDate>) -> Value {
    date.map_or(Value::Null, |d| Value::Text(d.format("%Y-%m-%d").to_string()))
}

/// Read-only handle on a SQLite ledger database.
///
/// Every call opens its own connection and closes it before returning, so a
/// `Ledger` holds no database resources between calls.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Creates a handle on the ledger at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::LedgerNotFound`] if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LedgerError::LedgerNotFound(path.to_path_buf()));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Returns the ledger file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, LedgerError> {
        Ok(Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?)
    }

    /// Sums debits and credits per account for the requested categories.
    ///
    /// Only postings whose journal date lies within `[start, end]` count; a
    /// missing bound is open on that side. Every account of a requested
    /// category is returned, ordered by code. An empty category list returns
    /// no rows without querying.
    ///
    /// # Errors
    ///
    /// Returns an error if a date bound is invalid, the query fails, or a sum
    /// cannot be converted to a decimal.
    pub fn aggregate(
        &self,
        account_types: &[AccountType],
        start: Option<&DateInput>,
        end: Option<&DateInput>,
    ) -> Result<Vec<AccountAggregate>, LedgerError> {
        let start = normalize_date(start)?;
        let end = normalize_date(end)?;

        if account_types.is_empty() {
            return Ok(Vec::new());
        }

        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            warn!(%start, %end, "Report start date is after end date");
        }

        let placeholders = (0..account_types.len())
            .map(|i| format!("?{}", i + 3))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = AGGREGATE_SQL.replace("{types}", &placeholders);

        let mut params = vec![iso(start), iso(end)];
        params.extend(
            account_types
                .iter()
                .map(|account_type| Value::Text(account_type.as_str().to_string())),
        );

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), AggregateRow::from_sql)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(AccountAggregate::try_from).collect()
    }

    /// Builds the Profit & Loss report for `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregation fails.
    pub fn profit_and_loss(
        &self,
        start: Option<&DateInput>,
        end: Option<&DateInput>,
        options: ReportOptions,
    ) -> Result<Vec<ReportRow>, LedgerError> {
        let kind = ReportKind::ProfitAndLoss;
        let accounts = self.aggregate(kind.account_types(), start, end)?;
        let rows = ReportService::profit_and_loss(accounts, options);
        debug!(report = %kind, ?start, ?end, rows = rows.len(), "Generated report");
        Ok(rows)
    }

    /// Builds the Balance Sheet as of `as_of` (inclusive, unbounded start).
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregation fails.
    pub fn balance_sheet(
        &self,
        as_of: Option<&DateInput>,
        options: ReportOptions,
    ) -> Result<Vec<ReportRow>, LedgerError> {
        let kind = ReportKind::BalanceSheet;
        let accounts = self.aggregate(kind.account_types(), None, as_of)?;
        let rows = ReportService::balance_sheet(accounts, options);
        debug!(report = %kind, ?as_of, rows = rows.len(), "Generated report");
        Ok(rows)
    }

    /// Builds the Trial Balance for `[start, end]` over the selected
    /// categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the aggregation fails.
    pub fn trial_balance(
        &self,
        start: Option<&DateInput>,
        end: Option<&DateInput>,
        options: &TrialBalanceOptions,
    ) -> Result<Vec<ReportRow>, LedgerError> {
        let kind = ReportKind::TrialBalance;
        let accounts = self.aggregate(options.selected_types(), start, end)?;
        let rows = ReportService::trial_balance(accounts, options);
        debug!(report = %kind, ?start, ?end, rows = rows.len(), "Generated report");
        Ok(rows)
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
