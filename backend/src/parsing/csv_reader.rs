use super::cell::CellValue;
use super::error::FileError;
use super::{SheetData, SheetRow};

/// Read comma-delimited text with a header row.
///
/// Records are read as bytes and decoded lossily so that one badly encoded
/// row does not make the whole file unreadable. Short rows are allowed; their
/// missing cells read as empty. Each row keeps the line it starts on, so
/// blank lines and quoted line breaks do not shift row numbers.
pub fn read_csv(bytes: &[u8]) -> Result<SheetData, FileError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| {
            String::from_utf8_lossy(h)
                .trim_start_matches('\u{feff}')
                .trim()
                .to_string()
        })
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(FileError::Empty);
    }

    let mut rows = Vec::new();
    for (i, record) in reader.byte_records().enumerate() {
        let record = record?;
        let cells: Vec<CellValue> = record
            .iter()
            .map(|field| CellValue::from_text(&String::from_utf8_lossy(field)))
            .collect();
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(i + 2);
        rows.push(SheetRow { line, cells });
    }

    Ok(SheetData { headers, rows })
}
