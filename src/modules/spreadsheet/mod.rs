//! Spreadsheet codec for bulk import and export
//!
//! Reads uploaded workbooks with calamine and writes exports with
//! rust_xlsxwriter. Both sides work on plain text cells; typing happens in the
//! reference feature.

mod reader;
mod writer;

pub use reader::{read_rows, SheetRow};
pub use writer::write_table;
