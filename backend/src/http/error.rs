//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::db::services::UploadError;
use crate::models::report::IngestReport;
use crate::services::export::ExportError;
use crate::services::ingest::IngestError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details (the ingest report for rejected uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (bad path or query parameter)
    BadRequest(String),
    /// Upload understood but nothing in it was usable
    Unprocessable {
        message: String,
        report: Option<Box<IngestReport>>,
    },
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Unprocessable { message, report } => {
                let mut error = ApiError::new("NO_VALID_FILES", message);
                if let Some(details) = report.and_then(|r| serde_json::to_value(*r).ok()) {
                    error = error.with_details(details);
                }
                (StatusCode::UNPROCESSABLE_ENTITY, error)
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("INTERNAL_ERROR", msg),
                )
            }
            AppError::Repository(e @ RepositoryError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", e.to_string()))
            }
            AppError::Repository(e @ RepositoryError::ValidationError { .. }) => {
                tracing::warn!("repository rejected data: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ApiError::new("VALIDATION_ERROR", e.to_string()),
                )
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<IngestError> for AppError {
    fn from(err: IngestError) -> Self {
        let message = err.to_string();
        match err {
            IngestError::NoFiles => AppError::BadRequest(message),
            IngestError::NoValidFiles { report } => AppError::Unprocessable {
                message,
                report: Some(report),
            },
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Repository(e) => e.into(),
            UploadError::Ingest(e) => e.into(),
            UploadError::Task(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                AppError::Repository(RepositoryError::not_found_with_context(
                    "gone",
                    Default::default(),
                )),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Repository(RepositoryError::validation_with_context(
                    "count mismatch",
                    Default::default(),
                )),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_no_valid_files_is_422() {
        let report = IngestReport {
            files: vec![],
            warnings: vec![],
            total_occurrences: 0,
            floor_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            checksum: String::new(),
        };
        let error: AppError = IngestError::NoValidFiles {
            report: Box::new(report),
        }
        .into();
        assert_eq!(error.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let error: AppError = IngestError::NoFiles.into();
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
