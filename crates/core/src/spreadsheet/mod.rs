//! Spreadsheet access - typed cells, row sources over `.xls`/`.xlsx`
//! workbooks, header location and data row iteration.

mod cell;
mod header_locator;
mod row_source;
mod sheet_reader;


pub use cell::{Cell, SheetRow};
pub use header_locator::{find_column, find_header_row, require_column};
pub use row_source::{GridSheet, RowSource, SpreadsheetFormat, Worksheet};
pub use sheet_reader::{data_rows, DataRows};
