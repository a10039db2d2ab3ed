//! Spreadsheet intake.
//!
//! Uploaded files are read into a [`SheetData`] (header row plus cell rows),
//! checked against the required column set, and typed row by row into
//! [`ScheduleTemplate`]s. A row that fails to type is reported and skipped;
//! a file that fails the column check is rejected as a whole.

pub mod cell;
pub mod columns;
pub mod csv_reader;
pub mod error;
pub mod template;
pub mod xlsx_reader;


use std::path::Path;

pub use cell::CellValue;
pub use columns::{ColumnIndex, REQUIRED_COLUMNS};
pub use error::{FileError, RecordError};

use crate::models::schedule::ScheduleTemplate;

/// One non-blank data row and the 1-based line it sits on in the source
/// sheet (the header is line 1).
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub line: usize,
    pub cells: Vec<CellValue>,
}

/// Raw contents of one worksheet. Blank rows are dropped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetData {
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Xlsx,
    Csv,
}

impl SpreadsheetFormat {
    /// Pick the reader from the file extension.
    pub fn from_file_name(name: &str) -> Result<Self, FileError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => Ok(SpreadsheetFormat::Xlsx),
            Some("csv") | Some("txt") => Ok(SpreadsheetFormat::Csv),
            _ => Err(FileError::UnsupportedFormat {
                name: name.to_string(),
            }),
        }
    }
}

/// Read an uploaded file into rows.
pub fn read_sheet(name: &str, bytes: &[u8]) -> Result<SheetData, FileError> {
    match SpreadsheetFormat::from_file_name(name)? {
        SpreadsheetFormat::Xlsx => xlsx_reader::read_xlsx(bytes),
        SpreadsheetFormat::Csv => csv_reader::read_csv(bytes),
    }
}

/// A row that could not be typed, with its line in the source sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    pub row: usize,
    pub error: RecordError,
}

/// Result of typing every row of one sheet.
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    pub rows_read: usize,
    pub templates: Vec<ScheduleTemplate>,
    pub failures: Vec<RowFailure>,
}

/// Validate the header row and type every data row.
///
/// Fails only when required columns are missing; row-level problems are
/// collected in [`ParsedSheet::failures`].
pub fn parse_templates(sheet: &SheetData, source: &str) -> Result<ParsedSheet, FileError> {
    let columns = ColumnIndex::from_headers(&sheet.headers)?;

    let mut parsed = ParsedSheet {
        rows_read: sheet.rows.len(),
        ..Default::default()
    };
    for row in &sheet.rows {
        match template::template_from_row(&columns, &row.cells, source) {
            Ok(template) => parsed.templates.push(template),
            Err(error) => parsed.failures.push(RowFailure {
                row: row.line,
                error,
            }),
        }
    }
    Ok(parsed)
}
