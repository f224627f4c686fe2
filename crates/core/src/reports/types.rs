//! Report data types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;

/// Account category.
///
/// In double-entry bookkeeping:
/// - Asset and Expense accounts normally carry a debit balance
/// - Liability, Equity and Income accounts normally carry a credit balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountType {
    /// Resources owned.
    Asset,
    /// Obligations owed.
    Liability,
    /// Owners' residual interest.
    Equity,
    /// Revenue earned.
    Income,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// Every category, in trial balance order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Income,
        Self::Expense,
    ];

    /// Returns the spelling stored in the ledger and used in exports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "Asset",
            Self::Liability => "Liability",
            Self::Equity => "Equity",
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" => Ok(Self::Asset),
            "liability" => Ok(Self::Liability),
            "equity" => Ok(Self::Equity),
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(ReportError::UnknownAccountType(s.to_string())),
        }
    }
}

/// Debit and credit totals for one account over a date range.
///
/// One record per account returned by the ledger aggregation query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountAggregate {
    /// Ledger row ID of the account.
    pub account_id: i64,
    /// Account category.
    pub account_type: AccountType,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Sum of posting debits.
    pub total_debit: Decimal,
    /// Sum of posting credits.
    pub total_credit: Decimal,
}

/// One line of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Account category.
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Signed amount under the report's sign convention.
    pub amount: Decimal,
}

impl ReportRow {
    /// Creates a report row.
    #[must_use]
    pub fn new(
        account_type: AccountType,
        code: impl Into<String>,
        name: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            account_type,
            code: code.into(),
            name: name.into(),
            amount,
        }
    }

    /// Returns the row as a `(type, code, name, amount)` tuple.
    #[must_use]
    pub fn as_tuple(&self) -> (AccountType, &str, &str, Decimal) {
        (self.account_type, &self.code, &self.name, self.amount)
    }
}

/// The named reports built on the ledger aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Income and expenses over a period.
    ProfitAndLoss,
    /// Assets, liabilities and equity as of a date.
    BalanceSheet,
    /// Net debit-minus-credit for selected categories over a period.
    TrialBalance,
}

/// Rank given to categories a report does not order explicitly.
const UNRANKED: u8 = 99;

impl ReportKind {
    /// Returns the categories the report covers by default.
    #[must_use]
    pub const fn account_types(self) -> &'static [AccountType] {
        match self {
            Self::ProfitAndLoss => &[AccountType::Income, AccountType::Expense],
            Self::BalanceSheet => &[
                AccountType::Asset,
                AccountType::Liability,
                AccountType::Equity,
            ],
            Self::TrialBalance => &AccountType::ALL,
        }
    }

    /// Returns the position of a category in the report's row order.
    #[must_use]
    pub const fn rank(self, account_type: AccountType) -> u8 {
        match (self, account_type) {
            (Self::ProfitAndLoss, AccountType::Income)
            | (Self::BalanceSheet | Self::TrialBalance, AccountType::Asset) => 0,
            (Self::ProfitAndLoss, AccountType::Expense)
            | (Self::BalanceSheet | Self::TrialBalance, AccountType::Liability) => 1,
            (Self::BalanceSheet | Self::TrialBalance, AccountType::Equity) => 2,
            (Self::TrialBalance, AccountType::Income) => 3,
            (Self::TrialBalance, AccountType::Expense) => 4,
            _ => UNRANKED,
        }
    }

    /// Applies the report's sign convention to an account's totals.
    ///
    /// Balance sheet liabilities and equity read credit minus debit; every
    /// other line, including Profit & Loss income, reads debit minus credit.
    #[must_use]
    pub fn signed_amount(self, account_type: AccountType, debit: Decimal, credit: Decimal) -> Decimal {
        match (self, account_type) {
            (Self::BalanceSheet, AccountType::Liability | AccountType::Equity) => credit - debit,
            _ => debit - credit,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProfitAndLoss => write!(f, "profit_and_loss"),
            Self::BalanceSheet => write!(f, "balance_sheet"),
            Self::TrialBalance => write!(f, "trial_balance"),
        }
    }
}

/// Options shared by the Profit & Loss and Balance Sheet reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Keep rows whose amount is exactly zero.
    pub include_zero: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { include_zero: true }
    }
}

/// Options for the Trial Balance report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialBalanceOptions {
    /// Keep rows whose amount is exactly zero.
    pub include_zero: bool,
    /// Categories to include; `None` means all five.
    pub account_types: Option<Vec<AccountType>>,
}

impl Default for TrialBalanceOptions {
    fn default() -> Self {
        Self {
            include_zero: true,
            account_types: None,
        }
    }
}

impl TrialBalanceOptions {
    /// Returns the categories the trial balance should cover.
    #[must_use]
    pub fn selected_types(&self) -> &[AccountType] {
        self.account_types
            .as_deref()
            .unwrap_or(ReportKind::TrialBalance.account_types())
    }
}
