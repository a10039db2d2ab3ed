//! Errors raised while reading uploaded spreadsheets.

use chrono::NaiveDate;

/// A single row could not be turned into a schedule template. The row is
/// skipped; the rest of the file is still processed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("missing value in column '{column}'")]
    MissingField { column: &'static str },

    #[error("invalid direction '{value}' in column 'A/D' (expected A or D)")]
    InvalidDirection { value: String },

    #[error("invalid date '{value}' in column '{column}'")]
    InvalidDate { column: &'static str, value: String },

    #[error("validity from {from} to {until} spans more than {max_days} days")]
    WindowTooLong {
        from: NaiveDate,
        until: NaiveDate,
        max_days: i64,
    },
}

/// A whole file was excluded from the upload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FileError {
    #[error("unsupported file type for '{name}' (expected .xlsx or .csv)")]
    UnsupportedFormat { name: String },

    #[error("could not read spreadsheet: {message}")]
    Unreadable { message: String },

    #[error("the file has no header row")]
    Empty,

    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("no flights were generated from this file")]
    NoOccurrences,
}

impl FileError {
    pub fn unreadable(message: impl ToString) -> Self {
        FileError::Unreadable {
            message: message.to_string(),
        }
    }
}

impl From<csv::Error> for FileError {
    fn from(err: csv::Error) -> Self {
        FileError::unreadable(err)
    }
}

impl From<calamine::XlsxError> for FileError {
    fn from(err: calamine::XlsxError) -> Self {
        FileError::unreadable(err)
    }
}
