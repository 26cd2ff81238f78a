//! Workbook access: evaluated cell values plus named-table references.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::error::ExtractError;

/// Evaluated value of one cell. Formula cells carry their computed result,
/// never the formula text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
    Empty,
}

/// Source of one spreadsheet's table data.
///
/// `row`/`col` are 1-based positions on the active sheet.
pub trait TableSource {
    /// Resolves a named table to its region reference, e.g. `A1:E10`.
    fn table_ref(&self, table_name: &str) -> Result<String, ExtractError>;

    fn value_at(&self, row: u32, col: u32) -> CellValue;
}

/// An `.xlsx` workbook read through calamine.
///
/// calamine exposes no accessor for named-table references, so those are
/// read straight from the `xl/tables/*.xml` entries of the archive, which
/// is where the format keeps them.
pub struct XlsxWorkbook {
    sheet: Range<Data>,
    tables: HashMap<String, String>,
}

impl XlsxWorkbook {
    /// Opens the workbook and loads its active (first) sheet and the
    /// workbook-wide table definitions.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let workbook_error =
            |source: Box<dyn std::error::Error + Send + Sync>| ExtractError::Workbook {
                path: path.display().to_string(),
                source,
            };

        let mut workbook: Xlsx<_> =
            open_workbook(path).map_err(|e| workbook_error(Box::new(e)))?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| workbook_error("workbook has no sheets".into()))?;
        let sheet = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| workbook_error(Box::new(e)))?;

        let tables = read_table_refs(path).map_err(workbook_error)?;
        debug!(
            "opened workbook {} (sheet {sheet_name:?}, {} named tables)",
            path.display(),
            tables.len()
        );

        Ok(Self { sheet, tables })
    }
}

impl TableSource for XlsxWorkbook {
    fn table_ref(&self, table_name: &str) -> Result<String, ExtractError> {
        self.tables
            .get(table_name)
            .cloned()
            .ok_or_else(|| ExtractError::TableNotFound {
                name: table_name.to_string(),
            })
    }

    fn value_at(&self, row: u32, col: u32) -> CellValue {
        if row == 0 || col == 0 {
            return CellValue::Empty;
        }
        match self.sheet.get_value((row - 1, col - 1)) {
            Some(data) => convert(data),
            None => CellValue::Empty,
        }
    }
}

fn convert(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::Date(datetime.date()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// Reads `displayName` → `ref` for every table definition in the archive.
fn read_table_refs(
    path: &Path,
) -> Result<HashMap<String, String>, Box<dyn std::error::Error + Send + Sync>> {
    // The root <table> element owns the region reference; the nested
    // <autoFilter> repeats it, so only the first ref= match counts.
    let name_attr = Regex::new(r#"displayName="([^"]+)""#)?;
    let ref_attr = Regex::new(r#" ref="([^"]+)""#)?;

    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;
    let entries: Vec<String> = archive
        .file_names()
        .filter(|n| n.starts_with("xl/tables/") && n.ends_with(".xml"))
        .map(String::from)
        .collect();

    let mut tables = HashMap::new();
    for entry in entries {
        let mut xml = String::new();
        archive.by_name(&entry)?.read_to_string(&mut xml)?;
        if let (Some(name), Some(reference)) = (name_attr.captures(&xml), ref_attr.captures(&xml))
        {
            tables.insert(name[1].to_string(), reference[1].to_string());
        }
    }
    Ok(tables)
}
