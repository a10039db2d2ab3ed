use calamine::{Data, Reader, Xlsx};
use std::io::Cursor;

use super::cell::CellValue;
use super::error::FileError;
use super::{SheetData, SheetRow};

/// Read the first worksheet of an `.xlsx` workbook. The first used row is
/// the header row; row lines are the worksheet's own 1-based row numbers.
pub fn read_xlsx(bytes: &[u8]) -> Result<SheetData, FileError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(FileError::Empty)?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let first_line = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(header_row) => header_row
            .iter()
            .map(|cell| cell_value(cell).as_text().unwrap_or_default())
            .collect(),
        None => return Err(FileError::Empty),
    };

    let rows = rows_iter
        .enumerate()
        .map(|(i, row)| SheetRow {
            line: first_line + i + 1,
            cells: row.iter().map(cell_value).collect(),
        })
        .filter(|row| !row.cells.iter().all(CellValue::is_empty))
        .collect();

    Ok(SheetData { headers, rows })
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::from_text(s),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from_text(s),
        Data::Error(_) | Data::Empty => CellValue::Empty,
        #[allow(unreachable_patterns)]
        _ => CellValue::Empty,
    }
}
