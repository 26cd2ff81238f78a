//! Spreadsheet input: workbook access and the table extractor.

pub mod extractor;
pub mod workbook;

pub use extractor::extract_records;
pub use workbook::{CellValue, TableSource, XlsxWorkbook};
