//! Extracts a named table region into transaction records.

use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::error::ExtractError;
use crate::excel::workbook::{CellValue, TableSource};
use crate::model::{TableRegion, TransactionRecord};

/// Canonical header names, matched case-sensitively and by name rather
/// than position.
pub const COLUMN_DATE: &str = "Date";
pub const COLUMN_AMOUNT: &str = "Amount";
pub const COLUMN_LARGE_CATEGORY: &str = "Large Category";
pub const COLUMN_MIDDLE_CATEGORY: &str = "Middle Category";
pub const COLUMN_CONTENT: &str = "Content";

/// Column positions of the five required fields inside a region.
struct HeaderMap {
    date: u32,
    amount: u32,
    large_category: u32,
    middle_category: u32,
    content: u32,
}

impl HeaderMap {
    fn from_header_row<S: TableSource + ?Sized>(
        source: &S,
        region: &TableRegion,
    ) -> Result<Self, ExtractError> {
        let find = |name: &'static str| -> Result<u32, ExtractError> {
            region
                .columns()
                .find(|&col| {
                    matches!(
                        source.value_at(region.min_row, col),
                        CellValue::Text(ref text) if text == name
                    )
                })
                .ok_or(ExtractError::MissingColumn { name })
        };

        Ok(Self {
            date: find(COLUMN_DATE)?,
            amount: find(COLUMN_AMOUNT)?,
            large_category: find(COLUMN_LARGE_CATEGORY)?,
            middle_category: find(COLUMN_MIDDLE_CATEGORY)?,
            content: find(COLUMN_CONTENT)?,
        })
    }
}

/// Reads the named table into records, preserving spreadsheet row order.
///
/// The region's first row is the header; a header-only table yields an
/// empty sequence, not an error.
pub fn extract_records<S: TableSource + ?Sized>(
    source: &S,
    table_name: &str,
) -> Result<Vec<TransactionRecord>, ExtractError> {
    let reference = source.table_ref(table_name)?;
    let region = TableRegion::parse(&reference)?;
    let header = HeaderMap::from_header_row(source, &region)?;
    debug!("table {table_name:?} spans {reference}");

    let records = region
        .data_rows()
        .map(|row| TransactionRecord {
            date: as_date(source.value_at(row, header.date)),
            amount: as_amount(source.value_at(row, header.amount)),
            large_category: as_text(source.value_at(row, header.large_category)),
            middle_category: as_text(source.value_at(row, header.middle_category)),
            content: as_text(source.value_at(row, header.content)),
        })
        .collect();
    Ok(records)
}

fn as_date(value: CellValue) -> Option<NaiveDate> {
    match value {
        CellValue::Date(date) => Some(date),
        CellValue::Number(serial) => excel_serial_to_date(serial),
        CellValue::Text(text) => {
            let text = text.trim();
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(text, "%Y/%m/%d"))
                .ok()
        }
        _ => None,
    }
}

/// Excel serial dates count days from 1899-12-30.
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.checked_add_signed(Duration::days(serial as i64)))
}

fn as_amount(value: CellValue) -> Option<i64> {
    match value {
        CellValue::Number(n) if n.is_finite() => Some(n as i64),
        CellValue::Text(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn as_text(value: CellValue) -> Option<String> {
    match value {
        CellValue::Text(text) => Some(text),
        CellValue::Number(n) if n.fract() == 0.0 => Some(format!("{}", n as i64)),
        CellValue::Number(n) => Some(n.to_string()),
        CellValue::Date(date) => Some(date.to_string()),
        CellValue::Bool(_) | CellValue::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeSheet {
        reference: String,
        cells: HashMap<(u32, u32), CellValue>,
    }

    impl FakeSheet {
        /// Lays `rows` out from A1, one vec per spreadsheet row.
        fn new(reference: &str, rows: Vec<Vec<CellValue>>) -> Self {
            let mut cells = HashMap::new();
            for (r, row) in rows.into_iter().enumerate() {
                for (c, value) in row.into_iter().enumerate() {
                    cells.insert((r as u32 + 1, c as u32 + 1), value);
                }
            }
            Self {
                reference: reference.to_string(),
                cells,
            }
        }
    }

    impl TableSource for FakeSheet {
        fn table_ref(&self, table_name: &str) -> Result<String, ExtractError> {
            if table_name == "Ledger" {
                Ok(self.reference.clone())
            } else {
                Err(ExtractError::TableNotFound {
                    name: table_name.to_string(),
                })
            }
        }

        fn value_at(&self, row: u32, col: u32) -> CellValue {
            self.cells
                .get(&(row, col))
                .cloned()
                .unwrap_or(CellValue::Empty)
        }
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn num(n: f64) -> CellValue {
        CellValue::Number(n)
    }

    fn date(y: i32, m: u32, d: u32) -> CellValue {
        CellValue::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn canonical_header() -> Vec<CellValue> {
        vec![
            text("Date"),
            text("Amount"),
            text("Large Category"),
            text("Middle Category"),
            text("Content"),
        ]
    }

    #[test]
    fn extracts_all_rows_in_order() {
        let sheet = FakeSheet::new(
            "A1:E4",
            vec![
                canonical_header(),
                vec![date(2024, 1, 1), num(-100.0), text("Food"), text("Grocery"), text("a")],
                vec![date(2024, 1, 2), num(2000.0), text("Income"), text("Salary"), text("b")],
                vec![date(2024, 1, 3), num(-300.0), text("Food"), text("Cafe"), text("c")],
            ],
        );

        let records = extract_records(&sheet, "Ledger").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].amount, Some(-100));
        assert_eq!(records[1].amount, Some(2000));
        assert_eq!(
            records[2].date,
            NaiveDate::from_ymd_opt(2024, 1, 3)
        );
        assert_eq!(records[2].content.as_deref(), Some("c"));
    }

    #[test]
    fn reordered_header_maps_by_name_not_position() {
        let sheet = FakeSheet::new(
            "A1:E2",
            vec![
                vec![
                    text("Large Category"),
                    text("Date"),
                    text("Amount"),
                    text("Content"),
                    text("Middle Category"),
                ],
                vec![
                    text("Food"),
                    date(2024, 1, 15),
                    num(-500.0),
                    text("Lunch"),
                    text("Restaurant"),
                ],
            ],
        );

        let records = extract_records(&sheet, "Ledger").unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.large_category.as_deref(), Some("Food"));
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(record.amount, Some(-500));
        assert_eq!(record.content.as_deref(), Some("Lunch"));
        assert_eq!(record.middle_category.as_deref(), Some("Restaurant"));
    }

    #[test]
    fn header_only_table_is_empty() {
        let sheet = FakeSheet::new("A1:E1", vec![canonical_header()]);
        let records = extract_records(&sheet, "Ledger").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn unknown_table_name_fails() {
        let sheet = FakeSheet::new("A1:E1", vec![canonical_header()]);
        let err = extract_records(&sheet, "Nope").unwrap_err();
        assert!(matches!(err, ExtractError::TableNotFound { name } if name == "Nope"));
    }

    #[test]
    fn unparseable_reference_fails() {
        let sheet = FakeSheet::new("A1", vec![canonical_header()]);
        let err = extract_records(&sheet, "Ledger").unwrap_err();
        assert!(matches!(err, ExtractError::MalformedRegion { .. }));
    }

    #[test]
    fn missing_required_column_fails() {
        let sheet = FakeSheet::new(
            "A1:E1",
            vec![vec![
                text("Date"),
                text("Amount"),
                text("Large Category"),
                text("Middle Category"),
                text("Memo"),
            ]],
        );
        let err = extract_records(&sheet, "Ledger").unwrap_err();
        assert!(matches!(err, ExtractError::MissingColumn { name: "Content" }));
    }

    #[test]
    fn blank_cells_become_absent_fields() {
        let sheet = FakeSheet::new(
            "A1:E2",
            vec![
                canonical_header(),
                vec![
                    date(2024, 2, 1),
                    CellValue::Empty,
                    text("Food"),
                    CellValue::Empty,
                    text(""),
                ],
            ],
        );
        let records = extract_records(&sheet, "Ledger").unwrap();
        let record = &records[0];
        assert!(record.date.is_some());
        assert!(record.amount.is_none());
        assert!(record.middle_category.is_none());
        // An empty string is still a present content field.
        assert_eq!(record.content.as_deref(), Some(""));
        assert!(!record.is_complete());
    }

    #[test]
    fn date_coercions() {
        assert_eq!(
            as_date(text("2024-01-15")),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            as_date(text("2024/01/15")),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        // Excel serial for 2024-01-15.
        assert_eq!(as_date(num(45306.0)), NaiveDate::from_ymd_opt(2024, 1, 15));
        assert_eq!(as_date(text("not a date")), None);
        assert_eq!(as_date(CellValue::Empty), None);
    }

    #[test]
    fn amount_coercions() {
        assert_eq!(as_amount(num(-500.0)), Some(-500));
        assert_eq!(as_amount(num(1234.0)), Some(1234));
        assert_eq!(as_amount(text(" -500 ")), Some(-500));
        assert_eq!(as_amount(text("lots")), None);
        assert_eq!(as_amount(CellValue::Empty), None);
    }

    #[test]
    fn text_coercions() {
        assert_eq!(as_text(text("Lunch")).as_deref(), Some("Lunch"));
        assert_eq!(as_text(num(7.0)).as_deref(), Some("7"));
        assert_eq!(as_text(CellValue::Empty), None);
    }
}
