//! Public API surface for the flight calendar backend.
//!
//! This file consolidates the types that cross the HTTP boundary.
//! All types derive Serialize so handlers can return them as JSON.

pub use crate::models::flight::{FlightOccurrence, FlightTable};
pub use crate::models::report::{
    FileStatus, FileSummary, IngestReport, IngestWarning, WarningLevel,
};
pub use crate::models::schedule::{Direction, ScheduleTemplate, WeekdayMask};
pub use crate::models::time::FlightTime;
pub use crate::services::aggregation::{
    AircraftShare, DailyAircraftPoint, DailyRow, HourBucket, MatrixRow, RowKind, WeeklyMatrix,
};
pub use crate::services::calendar::{DayEntry, MonthEntry, WeekEntry};
pub use crate::services::dashboard::{DailyDashboard, WeeklyDashboard};
pub use crate::services::filtering::{FilterOptions, FlightFilter};
pub use crate::services::flight_table::{FlightPage, TableKind};

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session identifier. One session owns one flight table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(SessionId)
    }
}

/// Lightweight session listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: SessionId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_flights: usize,
    /// Names of the files accepted by the last upload.
    pub files: Vec<String>,
}
