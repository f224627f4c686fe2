//! CSV export and import of report rows.
//!
//! Exports use a fixed `type,code,name,amount` header. Amounts are written as
//! plain decimal text and read back exactly.

pub mod codec;
pub mod error;


pub use codec::{ExportOptions, HEADER, read_report, write_report, write_rows};
pub use error::ExportError;
