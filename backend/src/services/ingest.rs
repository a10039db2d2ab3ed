//! Upload ingestion: read every file, type its rows, expand the templates and
//! merge the results into one occurrence list.

use chrono::NaiveDate;

use crate::db::checksum::batch_checksum;
use crate::models::flight::FlightOccurrence;
use crate::models::report::{
    FileStatus, FileSummary, IngestReport, IngestWarning, WarningLevel,
};
use crate::parsing::{parse_templates, read_sheet, FileError};

use super::expander::expand_all;

/// One file of an upload batch.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Merged occurrences of every accepted file plus the batch report.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub occurrences: Vec<FlightOccurrence>,
    pub report: IngestReport,
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("no files were uploaded")]
    NoFiles,

    /// Every file was rejected or produced no flights. The report lists why.
    #[error("no valid files to process ({} warnings)", .report.warnings.len())]
    NoValidFiles { report: Box<IngestReport> },
}

impl IngestError {
    pub fn report(&self) -> Option<&IngestReport> {
        match self {
            IngestError::NoValidFiles { report } => Some(report),
            IngestError::NoFiles => None,
        }
    }
}

struct FileOutcome {
    summary: FileSummary,
    occurrences: Vec<FlightOccurrence>,
}

fn ingest_one(
    file: &UploadedFile,
    floor: NaiveDate,
    warnings: &mut Vec<IngestWarning>,
) -> Result<FileOutcome, FileError> {
    let sheet = read_sheet(&file.name, &file.bytes)?;
    let parsed = parse_templates(&sheet, &file.name)?;

    for failure in &parsed.failures {
        log::warn!(
            "{}: skipping row {}: {}",
            file.name,
            failure.row,
            failure.error
        );
        warnings.push(IngestWarning::record(
            &file.name,
            failure.row,
            failure.error.to_string(),
        ));
    }

    let occurrences = expand_all(&parsed.templates, floor);
    if occurrences.is_empty() {
        return Err(FileError::NoOccurrences);
    }

    log::debug!(
        "{}: {} templates expanded into {} flights",
        file.name,
        parsed.templates.len(),
        occurrences.len()
    );

    Ok(FileOutcome {
        summary: FileSummary {
            name: file.name.clone(),
            status: FileStatus::Accepted,
            rows_read: parsed.rows_read,
            templates_accepted: parsed.templates.len(),
            records_skipped: parsed.failures.len(),
            occurrences: occurrences.len(),
        },
        occurrences,
    })
}

/// Process an upload batch.
///
/// Files are handled independently: a rejected file adds a warning and is
/// left out of the merge, the others are concatenated in upload order. Fails
/// with [`IngestError::NoValidFiles`] when nothing survives.
pub fn ingest_files(
    files: &[UploadedFile],
    floor: NaiveDate,
) -> Result<IngestOutcome, IngestError> {
    if files.is_empty() {
        return Err(IngestError::NoFiles);
    }

    let mut warnings = Vec::new();
    let mut summaries = Vec::with_capacity(files.len());
    let mut occurrences = Vec::new();

    for file in files {
        match ingest_one(file, floor, &mut warnings) {
            Ok(outcome) => {
                summaries.push(outcome.summary);
                occurrences.extend(outcome.occurrences);
            }
            Err(err) => {
                log::warn!("{}: file excluded: {}", file.name, err);
                warnings.push(IngestWarning::file(&file.name, err.to_string()));
                summaries.push(FileSummary::rejected(&file.name));
            }
        }
    }

    let checksum = batch_checksum(files.iter().map(|f| (f.name.as_str(), f.bytes.as_slice())));
    let mut report = IngestReport {
        files: summaries,
        warnings,
        total_occurrences: occurrences.len(),
        floor_date: floor,
        checksum,
    };

    if occurrences.is_empty() {
        report.warnings.push(
            IngestWarning::file("", "no valid files to process").with_level(WarningLevel::Error),
        );
        log::warn!("upload of {} file(s) produced no flights", files.len());
        return Err(IngestError::NoValidFiles {
            report: Box::new(report),
        });
    }

    log::info!(
        "ingested {} flights from {} of {} file(s)",
        report.total_occurrences,
        report.accepted_files().count(),
        files.len()
    );
    Ok(IngestOutcome {
        occurrences,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::time::default_floor_date;

    const HEADER: &str = "A/D,fltno,departure_time,arrival_time,origin,dest,STATION,weekday,from_date,until_date,flight_type,actypeadv,carrier";

    fn csv(rows: &[&str]) -> Vec<u8> {
        let mut out = HEADER.to_string();
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.into_bytes()
    }

    #[test]
    fn test_single_file() {
        let files = vec![UploadedFile::new(
            "winter.csv",
            csv(&["D,100,900,,MAD,LHR,MAD,13,2025-01-01,2025-01-31,J,A320,IB"]),
        )];
        let outcome = ingest_files(&files, default_floor_date()).unwrap();
        assert_eq!(outcome.occurrences.len(), 9);
        assert_eq!(outcome.report.total_occurrences, 9);
        assert_eq!(outcome.report.files[0].status, FileStatus::Accepted);
        assert_eq!(outcome.report.files[0].occurrences, 9);
        assert!(outcome.report.warnings.is_empty());
    }

    #[test]
    fn test_no_files() {
        assert!(matches!(
            ingest_files(&[], default_floor_date()),
            Err(IngestError::NoFiles)
        ));
    }

    #[test]
    fn test_row_failures_are_warnings() {
        let files = vec![UploadedFile::new(
            "a.csv",
            csv(&[
                "D,100,900,,MAD,LHR,MAD,1,2025-01-01,2025-01-31,J,A320,IB",
                "Q,101,900,,MAD,LHR,MAD,1,2025-01-01,2025-01-31,J,A320,IB",
            ]),
        )];
        let outcome = ingest_files(&files, default_floor_date()).unwrap();
        assert_eq!(outcome.report.files[0].records_skipped, 1);
        assert_eq!(outcome.report.warnings.len(), 1);
        assert_eq!(outcome.report.warnings[0].row, Some(3));
        assert_eq!(outcome.report.warnings[0].source, "a.csv");
    }

    #[test]
    fn test_warning_row_is_sheet_line() {
        let mut bytes = csv(&["D,100,900,,MAD,LHR,MAD,1,2025-01-01,2025-01-31,J,A320,IB"]);
        bytes.extend_from_slice(
            b"\n\n,,,,,,,,,,,,\nD,101,900,,MAD,LHR,MAD,1,2025-01-01,bad,J,A320,IB",
        );
        let files = vec![UploadedFile::new("gaps.csv", bytes)];
        let outcome = ingest_files(&files, default_floor_date()).unwrap();
        assert_eq!(outcome.report.warnings.len(), 1);
        // header, one row, a blank line and an empty record come first
        assert_eq!(outcome.report.warnings[0].row, Some(5));
    }

    #[test]
    fn test_file_without_flights_is_rejected() {
        let files = vec![
            UploadedFile::new(
                "old.csv",
                csv(&["D,1,900,,MAD,LHR,MAD,1,2024-01-01,2024-01-31,J,A320,IB"]),
            ),
            UploadedFile::new(
                "new.csv",
                csv(&["D,2,900,,MAD,LHR,MAD,1,2025-01-01,2025-01-31,J,A320,IB"]),
            ),
        ];
        let outcome = ingest_files(&files, default_floor_date()).unwrap();
        assert_eq!(outcome.report.files[0].status, FileStatus::Rejected);
        assert_eq!(outcome.report.rejected_files().count(), 1);
        assert!(outcome.occurrences.iter().all(|o| o.source_file == "new.csv"));
    }

    #[test]
    fn test_all_files_invalid() {
        let files = vec![
            UploadedFile::new("a.csv", b"A/D,fltno\nD,1\n".to_vec()),
            UploadedFile::new("b.pdf", b"%PDF".to_vec()),
        ];
        match ingest_files(&files, default_floor_date()) {
            Err(IngestError::NoValidFiles { report }) => {
                assert_eq!(report.total_occurrences, 0);
                assert_eq!(report.rejected_files().count(), 2);
                assert!(report
                    .warnings
                    .iter()
                    .any(|w| w.level == WarningLevel::Error));
            }
            other => panic!("expected NoValidFiles, got {:?}", other.map(|o| o.occurrences.len())),
        }
    }

    #[test]
    fn test_merge_keeps_upload_order() {
        let files = vec![
            UploadedFile::new(
                "first.csv",
                csv(&["D,1,900,,MAD,LHR,MAD,1,2025-01-13,2025-01-13,J,A320,IB"]),
            ),
            UploadedFile::new(
                "second.csv",
                csv(&["D,2,900,,MAD,LHR,MAD,1,2025-01-06,2025-01-06,J,A320,IB"]),
            ),
        ];
        let outcome = ingest_files(&files, default_floor_date()).unwrap();
        let sources: Vec<&str> = outcome
            .occurrences
            .iter()
            .map(|o| o.source_file.as_str())
            .collect();
        assert_eq!(sources, vec!["first.csv", "second.csv"]);
        assert_eq!(outcome.report.checksum.len(), 64);
    }
}
