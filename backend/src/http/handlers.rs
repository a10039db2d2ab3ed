//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint. Handlers load the session's
//! table snapshot, apply the request filters and delegate to the service
//! layer; every view is recomputed per request.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;

use super::dto::{
    FilterQuery, FlightTableResponse, HealthResponse, MonthListResponse, MonthQuery,
    SessionListResponse,
    TableQuery, UploadResponse, WeekListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    DailyDashboard, FilterOptions, FlightOccurrence, IngestReport, SessionId, SessionInfo,
    WeeklyDashboard,
};
use crate::db::services as db_services;
use crate::services::calendar::{self, month_label};
use crate::services::flight_table::{month_rows, month_tabs, paginate, PageRequest};
use crate::services::ingest::UploadedFile;
use crate::services::{dashboard, export};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn parse_session_id(raw: &str) -> Result<SessionId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid session id: {}", raw)))
}

fn parse_month(year: i32, month: u32) -> Result<(i32, u32), AppError> {
    if (1..=12).contains(&month) && NaiveDate::from_ymd_opt(year, month, 1).is_some() {
        Ok((year, month))
    } else {
        Err(AppError::BadRequest(format!("Invalid month: {}-{}", year, month)))
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date (expected YYYY-MM-DD): {}", raw)))
}

fn csv_download(file_name: String, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Run `f` over the filtered rows of a session's current table.
async fn with_filtered<T, F>(
    state: &AppState,
    session_id: &str,
    filters: &FilterQuery,
    f: F,
) -> Result<T, AppError>
where
    F: FnOnce(&[&FlightOccurrence]) -> T,
{
    let id = parse_session_id(session_id)?;
    let filter = filters.to_filter()?;
    let table = db_services::session_table(state.repository.as_ref(), id).await?;
    let rows = filter.apply(&table.occurrences);
    Ok(f(&rows))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Liveness plus the number of open sessions.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let storage = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "available".to_string(),
        Ok(false) => "unavailable".to_string(),
        Err(e) => format!("error: {}", e),
    };
    let sessions = state.repository.session_count().await.unwrap_or(0);

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        storage,
        sessions,
    }))
}

// =============================================================================
// Sessions
// =============================================================================

/// POST /v1/sessions
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionInfo>), AppError> {
    let info = state.repository.create_session().await?;
    Ok((StatusCode::CREATED, Json(info)))
}

/// GET /v1/sessions
pub async fn list_sessions(State(state): State<AppState>) -> HandlerResult<SessionListResponse> {
    let sessions = state.repository.list_sessions().await?;
    let total = sessions.len();
    Ok(Json(SessionListResponse { sessions, total }))
}

/// DELETE /v1/sessions/{session_id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_session_id(&session_id)?;
    state.repository.delete_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/sessions/{session_id}/uploads
///
/// Multipart upload of one or more spreadsheets. Replaces the session table
/// on success; on a batch with no usable file the table is emptied and a 422
/// carrying the ingest report is returned.
pub async fn upload_files(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    mut multipart: Multipart,
) -> HandlerResult<UploadResponse> {
    let id = parse_session_id(&session_id)?;

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field
            .file_name()
            .or_else(|| field.name())
            .unwrap_or("upload")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read {}: {}", name, e)))?;
        tracing::debug!("received {} ({} bytes)", name, bytes.len());
        files.push(UploadedFile::new(name, bytes.to_vec()));
    }

    tracing::info!("session {}: processing upload of {} file(s)", id, files.len());
    let floor = state.config.calendar.floor_date;
    let report = db_services::store_upload(state.repository.as_ref(), id, files, floor).await?;

    let session = state
        .repository
        .list_sessions()
        .await?
        .into_iter()
        .find(|s| s.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;

    Ok(Json(UploadResponse { session, report }))
}

/// DELETE /v1/sessions/{session_id}/flights
pub async fn reset_flights(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<SessionInfo> {
    let id = parse_session_id(&session_id)?;
    Ok(Json(state.repository.reset_table(id).await?))
}

/// GET /v1/sessions/{session_id}/report
///
/// Report of the last successful upload, `null` when there is none.
pub async fn get_report(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<Option<IngestReport>> {
    let id = parse_session_id(&session_id)?;
    let table = db_services::session_table(state.repository.as_ref(), id).await?;
    Ok(Json(table.report.clone()))
}

// =============================================================================
// Views
// =============================================================================

/// GET /v1/sessions/{session_id}/options
///
/// Filter values over the whole table, unaffected by any filter.
pub async fn get_options(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> HandlerResult<FilterOptions> {
    let id = parse_session_id(&session_id)?;
    let table = db_services::session_table(state.repository.as_ref(), id).await?;
    Ok(Json(FilterOptions::from_occurrences(&table.occurrences)))
}

/// GET /v1/sessions/{session_id}/months
///
/// With `kind=arrivals` or `kind=departures` only months holding flights of
/// that direction are listed, and `total_flights` counts that direction.
pub async fn list_months(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Query(filters): Query<FilterQuery>,
    Query(query): Query<MonthQuery>,
) -> HandlerResult<MonthListResponse> {
    let kind = query.table_kind()?;
    let response = with_filtered(&state, &session_id, &filters, |rows| MonthListResponse {
        kind,
        months: month_tabs(rows, kind),
        total_flights: rows.iter().filter(|o| kind.admits(o)).count(),
    })
    .await?;
    Ok(Json(response))
}

/// GET /v1/sessions/{session_id}/months/{year}/{month}/weeks
pub async fn list_weeks(
    State(state): State<AppState>,
    Path((session_id, year, month)): Path<(String, i32, u32)>,
    Query(filters): Query<FilterQuery>,
) -> HandlerResult<WeekListResponse> {
    let (year, month) = parse_month(year, month)?;
    let weeks = with_filtered(&state, &session_id, &filters, |rows| {
        calendar::weeks(rows, year, month)
    })
    .await?;
    Ok(Json(WeekListResponse {
        year,
        month,
        label: month_label(year, month),
        weeks,
    }))
}

/// GET /v1/sessions/{session_id}/months/{year}/{month}/weeks/{week}
///
/// Weekly dashboard, `null` when the week has no flights.
pub async fn get_weekly_dashboard(
    State(state): State<AppState>,
    Path((session_id, year, month, week)): Path<(String, i32, u32, u32)>,
    Query(filters): Query<FilterQuery>,
) -> HandlerResult<Option<WeeklyDashboard>> {
    let (year, month) = parse_month(year, month)?;
    let view = with_filtered(&state, &session_id, &filters, |rows| {
        dashboard::weekly_dashboard(rows, year, month, week)
    })
    .await?;
    Ok(Json(view))
}

/// GET /v1/sessions/{session_id}/days/{date}
///
/// Daily dashboard, `null` when the day has no flights.
pub async fn get_daily_dashboard(
    State(state): State<AppState>,
    Path((session_id, date)): Path<(String, String)>,
    Query(filters): Query<FilterQuery>,
) -> HandlerResult<Option<DailyDashboard>> {
    let date = parse_day(&date)?;
    let view = with_filtered(&state, &session_id, &filters, |rows| {
        dashboard::daily_dashboard(rows, date)
    })
    .await?;
    Ok(Json(view))
}

/// GET /v1/sessions/{session_id}/months/{year}/{month}/flights
///
/// Paginated arrivals, departures or combined table of one month.
pub async fn get_flight_table(
    State(state): State<AppState>,
    Path((session_id, year, month)): Path<(String, i32, u32)>,
    Query(filters): Query<FilterQuery>,
    Query(table): Query<TableQuery>,
) -> HandlerResult<FlightTableResponse> {
    let (year, month) = parse_month(year, month)?;
    let kind = table.table_kind()?;
    let weeks = table.week_numbers()?;
    let request = PageRequest {
        page: table.page.unwrap_or(1),
        page_size: table
            .page_size
            .unwrap_or(state.config.calendar.default_page_size),
    };

    let response = with_filtered(&state, &session_id, &filters, |rows| {
        let of_kind: Vec<&FlightOccurrence> =
            rows.iter().copied().filter(|o| kind.admits(o)).collect();
        FlightTableResponse {
            year,
            month,
            label: month_label(year, month),
            kind,
            weeks: calendar::weeks(&of_kind, year, month),
            page: paginate(&month_rows(rows, kind, year, month, &weeks), request),
        }
    })
    .await?;
    Ok(Json(response))
}

/// GET /v1/sessions/{session_id}/months/{year}/{month}/export
pub async fn export_month(
    State(state): State<AppState>,
    Path((session_id, year, month)): Path<(String, i32, u32)>,
    Query(filters): Query<FilterQuery>,
    Query(table): Query<TableQuery>,
) -> Result<Response, AppError> {
    let (year, month) = parse_month(year, month)?;
    let kind = table.table_kind()?;
    let weeks = table.week_numbers()?;

    let bytes = with_filtered(&state, &session_id, &filters, |rows| {
        export::to_csv_bytes(month_rows(rows, kind, year, month, &weeks))
    })
    .await??;
    Ok(csv_download(export::month_file_name(kind, month), bytes))
}

/// GET /v1/sessions/{session_id}/days/{date}/export
pub async fn export_day(
    State(state): State<AppState>,
    Path((session_id, date)): Path<(String, String)>,
    Query(filters): Query<FilterQuery>,
) -> Result<Response, AppError> {
    let date = parse_day(&date)?;
    let bytes = with_filtered(&state, &session_id, &filters, |rows| {
        export::to_csv_bytes(dashboard::day_flights(rows, date))
    })
    .await??;
    Ok(csv_download(export::day_file_name(date), bytes))
}
