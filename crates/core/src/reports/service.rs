//! Report generation service.

use super::types::{
    AccountAggregate, ReportKind, ReportOptions, ReportRow, TrialBalanceOptions,
};

/// Service for generating financial reports from account aggregates.
pub struct ReportService;

impl ReportService {
    /// Generates Profit & Loss rows.
    ///
    /// Every line reads debit minus credit, so income normally shows as a
    /// negative amount. Rows are ordered Income then Expense, by code.
    #[must_use]
    pub fn profit_and_loss(accounts: Vec<AccountAggregate>, options: ReportOptions) -> Vec<ReportRow> {
        Self::build(ReportKind::ProfitAndLoss, accounts, options.include_zero)
    }

    /// Generates Balance Sheet rows.
    ///
    /// Assets read debit minus credit; liabilities and equity read credit
    /// minus debit. Rows are ordered Asset, Liability, Equity, by code.
    #[must_use]
    pub fn balance_sheet(accounts: Vec<AccountAggregate>, options: ReportOptions) -> Vec<ReportRow> {
        Self::build(ReportKind::BalanceSheet, accounts, options.include_zero)
    }

    /// Generates Trial Balance rows.
    ///
    /// Every line reads debit minus credit. Rows are ordered Asset,
    /// Liability, Equity, Income, Expense, by code.
    #[must_use]
    pub fn trial_balance(
        accounts: Vec<AccountAggregate>,
        options: &TrialBalanceOptions,
    ) -> Vec<ReportRow> {
        Self::build(ReportKind::TrialBalance, accounts, options.include_zero)
    }

    /// Applies a report's sign convention, zero filter and row order.
    ///
    /// The zero filter runs on the signed amount, after conversion.
    #[must_use]
    pub fn build(
        kind: ReportKind,
        accounts: Vec<AccountAggregate>,
        include_zero: bool,
    ) -> Vec<ReportRow> {
        let mut rows: Vec<ReportRow> = accounts
            .into_iter()
            .map(|account| {
                let amount = kind.signed_amount(
                    account.account_type,
                    account.total_debit,
                    account.total_credit,
                );
                ReportRow::new(account.account_type, account.code, account.name, amount)
            })
            .filter(|row| include_zero || !row.amount.is_zero())
            .collect();

        rows.sort_by(|a, b| {
            kind.rank(a.account_type)
                .cmp(&kind.rank(b.account_type))
                .then_with(|| a.code.cmp(&b.code))
        });

        rows
    }
}
