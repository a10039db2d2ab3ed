//! Format-independent cell values.
//!
//! Both the CSV and the XLSX readers lower their cells into [`CellValue`] so
//! that row typing in [`super::template`] does not care where a row came from.

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::time::{date_from_serial, parse_date_text};

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// CSV fields are always text; blanks become `Empty`.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the cell as display text. Whole numbers drop their fraction so a
    /// flight number stored as `3120.0` reads `3120`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::DateTime(dt) => Some(dt.date().format("%Y-%m-%d").to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Dates may arrive as native date cells, as text, or as bare serial
    /// numbers when a date column lost its formatting.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::DateTime(dt) => Some(dt.date()),
            CellValue::Text(s) => parse_date_text(s),
            CellValue::Number(n) => date_from_serial(*n),
            CellValue::Empty => None,
        }
    }
}
