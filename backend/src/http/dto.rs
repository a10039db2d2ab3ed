//! Data Transfer Objects for the HTTP API.
//!
//! View payloads (dashboards, pages, reports) are re-exported from the api
//! module since they already derive Serialize. This module adds the query
//! parameter types and the thin response wrappers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use crate::api::{
    DailyDashboard, FilterOptions, FlightFilter, FlightPage, IngestReport, MonthEntry,
    SessionInfo, TableKind, WeekEntry, WeeklyDashboard,
};
use crate::models::time::parse_date_text;

use super::error::AppError;

/// Split a comma-separated query value, dropping blanks.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Filter parameters shared by every view endpoint. Each is a
/// comma-separated list; an absent or empty list does not filter.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FilterQuery {
    #[serde(default)]
    pub stations: Option<String>,
    #[serde(default)]
    pub flight_types: Option<String>,
    #[serde(default)]
    pub dates: Option<String>,
    #[serde(default)]
    pub sources: Option<String>,
    #[serde(default)]
    pub carriers: Option<String>,
    #[serde(default)]
    pub aircraft_types: Option<String>,
}

impl FilterQuery {
    pub fn to_filter(&self) -> Result<FlightFilter, AppError> {
        let dates = split_list(self.dates.as_deref())
            .into_iter()
            .map(|text| {
                parse_date_text(&text)
                    .ok_or_else(|| AppError::BadRequest(format!("Invalid date in filter: {}", text)))
            })
            .collect::<Result<Vec<NaiveDate>, AppError>>()?;

        Ok(FlightFilter {
            stations: split_list(self.stations.as_deref()),
            flight_types: split_list(self.flight_types.as_deref()),
            dates,
            sources: split_list(self.sources.as_deref()),
            carriers: split_list(self.carriers.as_deref()),
            aircraft_types: split_list(self.aircraft_types.as_deref()),
        })
    }
}

/// Query parameters for the month list. `kind` narrows the list to the
/// months holding arrivals or departures, one tab per month.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MonthQuery {
    #[serde(default)]
    pub kind: Option<String>,
}

impl MonthQuery {
    pub fn table_kind(&self) -> Result<TableKind, AppError> {
        parse_kind(self.kind.as_deref())
    }
}

fn parse_kind(raw: Option<&str>) -> Result<TableKind, AppError> {
    raw.unwrap_or_default().parse().map_err(AppError::BadRequest)
}

/// Query parameters for the monthly flight table and month export.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TableQuery {
    /// `arrivals`, `departures` or `all` (default)
    #[serde(default)]
    pub kind: Option<String>,
    /// Comma-separated ISO week numbers
    #[serde(default)]
    pub weeks: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl TableQuery {
    pub fn table_kind(&self) -> Result<TableKind, AppError> {
        parse_kind(self.kind.as_deref())
    }

    pub fn week_numbers(&self) -> Result<Vec<u32>, AppError> {
        split_list(self.weeks.as_deref())
            .into_iter()
            .map(|w| {
                w.parse::<u32>()
                    .ok()
                    .filter(|n| (1..=53).contains(n))
                    .ok_or_else(|| AppError::BadRequest(format!("Invalid week number: {}", w)))
            })
            .collect()
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Storage backend status
    pub storage: String,
    pub sessions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionInfo>,
    pub total: usize,
}

/// Response to a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub session: SessionInfo,
    pub report: IngestReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthListResponse {
    pub kind: TableKind,
    pub months: Vec<MonthEntry>,
    pub total_flights: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekListResponse {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub weeks: Vec<WeekEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlightTableResponse {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub kind: TableKind,
    pub weeks: Vec<WeekEntry>,
    #[serde(flatten)]
    pub page: FlightPage,
}
