//! Session-level operations that combine ingestion with storage.
//!
//! These work with any [`SessionRepository`] implementation and are what the
//! HTTP handlers and the integration tests call.

use std::sync::Arc;

use chrono::NaiveDate;

use super::repository::{RepositoryError, RepositoryResult, SessionRepository};
use crate::api::SessionId;
use crate::models::flight::FlightTable;
use crate::models::report::IngestReport;
use crate::services::ingest::{ingest_files, IngestError, UploadedFile};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("ingest task failed: {0}")]
    Task(String),
}

pub async fn health_check(repo: &dyn SessionRepository) -> RepositoryResult<bool> {
    repo.health_check()
        .await
        .map_err(|e| e.with_operation("health_check"))
}

/// Ingest an upload batch and make it the session's table.
///
/// Parsing and expansion run on the blocking pool. When files were uploaded
/// but none is usable the session table is reset to empty and the ingest
/// error, with its report, is returned. An empty batch leaves the table as is.
pub async fn store_upload(
    repo: &dyn SessionRepository,
    id: SessionId,
    files: Vec<UploadedFile>,
    floor: NaiveDate,
) -> Result<IngestReport, UploadError> {
    // fail fast on an unknown session before doing any parsing
    repo.fetch_table(id).await?;

    let result = tokio::task::spawn_blocking(move || ingest_files(&files, floor))
        .await
        .map_err(|e| UploadError::Task(e.to_string()))?;

    match result {
        Ok(outcome) => {
            let report = outcome.report.clone();
            repo.replace_table(id, FlightTable::new(outcome.occurrences, outcome.report))
                .await?;
            Ok(report)
        }
        Err(err @ IngestError::NoValidFiles { .. }) => {
            log::warn!("upload for session {} rejected: {}", id, err);
            repo.reset_table(id).await?;
            Err(err.into())
        }
        Err(err) => {
            log::warn!("upload for session {} ignored: {}", id, err);
            Err(err.into())
        }
    }
}

/// Current table of a session.
pub async fn session_table(
    repo: &dyn SessionRepository,
    id: SessionId,
) -> RepositoryResult<Arc<FlightTable>> {
    repo.fetch_table(id).await
}

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;
