//! Presentation summary of a Profit & Loss report.
//!
//! The engine keeps the raw debit-minus-credit convention, which shows
//! income as a negative amount. Readers expect income to be positive, so the
//! summary flips it here and nowhere else.

use rust_decimal::Decimal;
use serde::Serialize;

use super::types::{AccountType, ReportRow};

/// A named amount in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    /// Account name.
    pub account: String,
    /// Display amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Profit & Loss totals for display.
///
/// Serializes with camelCase keys and floating-point amounts for transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAndLossSummary {
    /// Income lines, shown positive.
    pub income: Vec<SummaryLine>,
    /// Expense lines, as reported.
    pub expenses: Vec<SummaryLine>,
    /// Sum of income lines.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    /// Sum of expense lines.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expenses: Decimal,
    /// Total income minus total expenses.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_profit: Decimal,
    /// Net profit as a percentage of total income; zero without income.
    #[serde(with = "rust_decimal::serde::float")]
    pub profit_margin: Decimal,
}

impl ProfitAndLossSummary {
    /// Builds the summary from Profit & Loss rows.
    ///
    /// Rows of any other category are ignored.
    #[must_use]
    pub fn from_rows(rows: &[ReportRow]) -> Self {
        let mut income = Vec::new();
        let mut expenses = Vec::new();

        for row in rows {
            let (account_type, _, name, amount) = row.as_tuple();
            match account_type {
                AccountType::Income => income.push(SummaryLine {
                    account: name.to_string(),
                    amount: amount.abs(),
                }),
                AccountType::Expense => expenses.push(SummaryLine {
                    account: name.to_string(),
                    amount,
                }),
                AccountType::Asset | AccountType::Liability | AccountType::Equity => {}
            }
        }

        let total_income: Decimal = income.iter().map(|line| line.amount).sum();
        let total_expenses: Decimal = expenses.iter().map(|line| line.amount).sum();
        let net_profit = total_income - total_expenses;
        let profit_margin = if total_income > Decimal::ZERO {
            net_profit
                .checked_div(total_income)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        Self {
            income,
            expenses,
            total_income,
            total_expenses,
            net_profit,
            profit_margin,
        }
    }
}
