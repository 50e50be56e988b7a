//! Workbook access
//!
//! Sheets are read through calamine; cells come back as the text a
//! translator sees in the spreadsheet.

mod reader;

pub use reader::{cell_to_string, SheetData, WorkbookReader};
