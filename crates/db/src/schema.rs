//! Ledger schema.
//!
//! The report engine only reads these tables. The DDL is kept here so tests
//! and local tooling can create a compatible database.

use rusqlite::Connection;

/// DDL for the tables the report engine reads.
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS accounts (
    id   INTEGER PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    type TEXT NOT NULL CHECK (type IN ('Asset', 'Liability', 'Equity', 'Income', 'Expense'))
);

CREATE TABLE IF NOT EXISTS journals (
    id   INTEGER PRIMARY KEY,
    date DATE NOT NULL
);

CREATE TABLE IF NOT EXISTS postings (
    id         INTEGER PRIMARY KEY,
    journal_id INTEGER NOT NULL REFERENCES journals (id),
    account_id INTEGER NOT NULL REFERENCES accounts (id),
    debit      NUMERIC NOT NULL DEFAULT 0,
    credit     NUMERIC NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_postings_account ON postings (account_id);
CREATE INDEX IF NOT EXISTS idx_postings_journal ON postings (journal_id);
";

/// Creates the ledger tables if they do not exist.
///
/// # Errors
///
/// Returns an error if the DDL fails to execute.
pub fn apply(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}
