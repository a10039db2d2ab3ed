//! Ingest report returned after every upload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningLevel {
    Info,
    Warning,
    Error,
}

/// A non-fatal problem found while reading an upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestWarning {
    pub level: WarningLevel,
    /// File the problem belongs to.
    pub source: String,
    /// Line of the record in its sheet (header is line 1), when the problem is
    /// a single record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    pub message: String,
}

impl IngestWarning {
    pub fn file(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: WarningLevel::Warning,
            source: source.into(),
            row: None,
            message: message.into(),
        }
    }

    pub fn record(source: impl Into<String>, row: usize, message: impl Into<String>) -> Self {
        Self {
            level: WarningLevel::Warning,
            source: source.into(),
            row: Some(row),
            message: message.into(),
        }
    }

    pub fn with_level(mut self, level: WarningLevel) -> Self {
        self.level = level;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Accepted,
    Rejected,
}

/// Per-file outcome of an upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub name: String,
    pub status: FileStatus,
    pub rows_read: usize,
    pub templates_accepted: usize,
    pub records_skipped: usize,
    pub occurrences: usize,
}

impl FileSummary {
    pub fn rejected(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: FileStatus::Rejected,
            rows_read: 0,
            templates_accepted: 0,
            records_skipped: 0,
            occurrences: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub files: Vec<FileSummary>,
    pub warnings: Vec<IngestWarning>,
    pub total_occurrences: usize,
    pub floor_date: NaiveDate,
    /// SHA-256 over the uploaded file names and contents.
    pub checksum: String,
}

impl IngestReport {
    pub fn accepted_files(&self) -> impl Iterator<Item = &FileSummary> {
        self.files.iter().filter(|f| f.status == FileStatus::Accepted)
    }

    pub fn rejected_files(&self) -> impl Iterator<Item = &FileSummary> {
        self.files.iter().filter(|f| f.status == FileStatus::Rejected)
    }
}
