//! Integration tests for the reporting facade.
//!
//! Builds a real SQLite ledger on disk, generates reports through the
//! facade, and checks the exported CSV files.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tally_core::export::ExportError;
use tally_db::LedgerError;
use tally_reporting::{
    AccountType, DateInput, ExportOptions, ExportTarget, ProfitAndLossSummary, ReportRow,
    ReportingError, generate_balance_sheet, generate_profit_and_loss, generate_trial_balance,
    load_balance_sheet_report, load_profit_and_loss_report, load_trial_balance_report,
};
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

/// Seeds a ledger with an invoice, its VAT, a payment and an expense.
fn seed_ledger(dir: &Path) -> PathBuf {
    let path = dir.join("ledger.db");
    let conn = Connection::open(&path).unwrap();
    tally_db::schema::apply(&conn).unwrap();

    let accounts = [
        ("1000-Bank", "Bank", "Asset"),
        ("1100-AR", "Accounts Receivable", "Asset"),
        ("2000-VAT Payable", "VAT Payable", "Liability"),
        ("3000-Retained Earnings", "Retained Earnings", "Equity"),
        ("4000-Sales:Services", "Sales - Services", "Income"),
        ("5000-Expenses:General", "Expenses - General", "Expense"),
    ];
    for (code, name, account_type) in accounts {
        conn.execute(
            "INSERT INTO accounts (code, name, type) VALUES (?1, ?2, ?3)",
            params![code, name, account_type],
        )
        .unwrap();
    }

    let journals = [
        ("2025-09-28", vec![("1100-AR", 1200, 0), ("4000-Sales:Services", 0, 1000), ("2000-VAT Payable", 0, 200)]),
        ("2025-10-05", vec![("1000-Bank", 1200, 0), ("1100-AR", 0, 1200)]),
        ("2025-10-20", vec![("5000-Expenses:General", 250, 0), ("1000-Bank", 0, 250)]),
    ];
    for (date, postings) in journals {
        conn.execute("INSERT INTO journals (date) VALUES (?1)", params![date])
            .unwrap();
        let journal_id = conn.last_insert_rowid();
        for (code, debit, credit) in postings {
            conn.execute(
                "INSERT INTO postings (journal_id, account_id, debit, credit)
                 SELECT ?1, id, ?3, ?4 FROM accounts WHERE code = ?2",
                params![journal_id, code, debit, credit],
            )
            .unwrap();
        }
    }

    path
}

fn amounts(rows: &[ReportRow]) -> Vec<(&str, Decimal)> {
    rows.iter().map(|r| (r.code.as_str(), r.amount)).collect()
}

// ============================================================================
// Profit & Loss
// ============================================================================

#[test]
fn test_profit_and_loss_exports_and_reloads() {
    let dir = TempDir::new().unwrap();
    let ledger = seed_ledger(dir.path());
    let target = ExportTarget::new(dir.path().join("reports/pl_ytd.csv"), ExportOptions::default());

    let rows = generate_profit_and_loss(&ledger, None, None, Some(&target)).unwrap();

    assert_eq!(
        amounts(&rows),
        vec![("4000-Sales:Services", dec!(-1000)), ("5000-Expenses:General", dec!(250))]
    );
    assert_eq!(load_profit_and_loss_report(&target.path).unwrap(), rows);

    let csv = fs::read_to_string(&target.path).unwrap();
    assert_eq!(
        csv.lines().collect::<Vec<_>>(),
        vec![
            "type,code,name,amount",
            "Income,4000-Sales:Services,Sales - Services,-1000",
            "Expense,5000-Expenses:General,Expenses - General,250",
        ]
    );
}

#[test]
fn test_profit_and_loss_without_export_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let ledger = seed_ledger(dir.path());

    let rows = generate_profit_and_loss(&ledger, None, None, None).unwrap();

    assert_eq!(rows.len(), 2);
    assert!(!dir.path().join("reports").exists());
}

#[test]
fn test_profit_and_loss_summary_shows_profit() {
    let dir = TempDir::new().unwrap();
    let ledger = seed_ledger(dir.path());

    let rows = generate_profit_and_loss(&ledger, None, None, None).unwrap();
    let summary = ProfitAndLossSummary::from_rows(&rows);

    assert_eq!(summary.total_income, dec!(1000));
    assert_eq!(summary.total_expenses, dec!(250));
    assert_eq!(summary.net_profit, dec!(750));
    assert_eq!(summary.profit_margin, dec!(75));
}

#[test]
fn test_profit_and_loss_period() {
    let dir = TempDir::new().unwrap();
    let ledger = seed_ledger(dir.path());
    let start = DateInput::from("2025-10-01");
    let end = DateInput::from("2025-10-31");

    let rows = generate_profit_and_loss(&ledger, Some(&start), Some(&end), None).unwrap();

    assert_eq!(
        amounts(&rows),
        vec![("4000-Sales:Services", Decimal::ZERO), ("5000-Expenses:General", dec!(250))]
    );
}

// ============================================================================
// Balance Sheet
// ============================================================================

#[test]
fn test_balance_sheet_export_options() {
    let dir = TempDir::new().unwrap();
    let ledger = seed_ledger(dir.path());
    let target = ExportTarget::new(
        dir.path().join("balance_sheet_asof.csv"),
        ExportOptions {
            decimal_places: Some(2),
            zero_as_blank: true,
        },
    );
    let as_of = DateInput::from("2025-09-30");

    let rows = generate_balance_sheet(&ledger, Some(&as_of), Some(&target)).unwrap();

    assert_eq!(
        amounts(&rows),
        vec![
            ("1000-Bank", Decimal::ZERO),
            ("1100-AR", dec!(1200)),
            ("2000-VAT Payable", dec!(200)),
            ("3000-Retained Earnings", Decimal::ZERO),
        ]
    );

    let csv = fs::read_to_string(&target.path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[1], "Asset,1000-Bank,Bank,");
    assert_eq!(lines[2], "Asset,1100-AR,Accounts Receivable,1200");

    // Blank cells come back as zero, so the reload matches the generated rows.
    assert_eq!(load_balance_sheet_report(&target.path).unwrap(), rows);
}

#[test]
fn test_balance_sheet_groups_categories() {
    let dir = TempDir::new().unwrap();
    let ledger = seed_ledger(dir.path());

    let rows = generate_balance_sheet(&ledger, None, None).unwrap();

    let types: Vec<AccountType> = rows.iter().map(|r| r.account_type).collect();
    assert_eq!(
        types,
        vec![
            AccountType::Asset,
            AccountType::Asset,
            AccountType::Liability,
            AccountType::Equity,
        ]
    );
}

// ============================================================================
// Trial Balance
// ============================================================================

#[test]
fn test_trial_balance_export_round_trip() {
    let dir = TempDir::new().unwrap();
    let ledger = seed_ledger(dir.path());
    let first = ExportTarget::new(dir.path().join("tb.csv"), ExportOptions::default());

    let rows = generate_trial_balance(&ledger, None, None, None, Some(&first)).unwrap();
    assert_eq!(rows.len(), 6);
    assert_eq!(rows.iter().map(|r| r.amount).sum::<Decimal>(), Decimal::ZERO);

    let reloaded = load_trial_balance_report(&first.path).unwrap();
    let second = dir.path().join("tb_again.csv");
    tally_core::export::write_report(&reloaded, &second, ExportOptions::default()).unwrap();

    assert_eq!(load_trial_balance_report(&second).unwrap(), rows);
    assert_eq!(
        fs::read_to_string(&first.path).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn test_trial_balance_selected_types() {
    let dir = TempDir::new().unwrap();
    let ledger = seed_ledger(dir.path());

    let rows = generate_trial_balance(
        &ledger,
        None,
        None,
        Some(&[AccountType::Income, AccountType::Asset]),
        None,
    )
    .unwrap();

    assert_eq!(
        amounts(&rows),
        vec![
            ("1000-Bank", dec!(950)),
            ("1100-AR", Decimal::ZERO),
            ("4000-Sales:Services", dec!(-1000)),
        ]
    );
}

#[test]
fn test_trial_balance_empty_selection() {
    let dir = TempDir::new().unwrap();
    let ledger = seed_ledger(dir.path());

    let rows = generate_trial_balance(&ledger, None, None, Some(&[]), None).unwrap();

    assert!(rows.is_empty());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_ledger_is_reported() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.db");

    let err = generate_profit_and_loss(&missing, None, None, None).unwrap_err();

    assert!(matches!(
        err,
        ReportingError::Ledger(LedgerError::LedgerNotFound(ref p)) if *p == missing
    ));
    assert!(!missing.exists());
}

#[test]
fn test_invalid_date_aborts_before_export() {
    let dir = TempDir::new().unwrap();
    let ledger = seed_ledger(dir.path());
    let target = ExportTarget::new(dir.path().join("bs.csv"), ExportOptions::default());
    let as_of = DateInput::from("30/09/2025");

    let err = generate_balance_sheet(&ledger, Some(&as_of), Some(&target)).unwrap_err();

    assert!(matches!(err, ReportingError::Ledger(LedgerError::InvalidDate(_))));
    assert!(!target.path.exists());
}

#[test]
fn test_load_missing_export() {
    let dir = TempDir::new().unwrap();

    let err = load_profit_and_loss_report(dir.path().join("pl.csv")).unwrap_err();

    assert!(matches!(err, ExportError::NotFound(_)));
}
