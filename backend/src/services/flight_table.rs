//! Arrivals and departures tables, one tab per month, with optional week
//! selection and pagination.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::flight::FlightOccurrence;

use super::calendar::{self, MonthEntry};

pub const MIN_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 1000;
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Which direction a table shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Arrivals,
    Departures,
    #[default]
    All,
}

impl TableKind {
    pub fn admits(&self, occurrence: &FlightOccurrence) -> bool {
        match self {
            TableKind::Arrivals => occurrence.is_arrival(),
            TableKind::Departures => occurrence.is_departure(),
            TableKind::All => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Arrivals => "arrivals",
            TableKind::Departures => "departures",
            TableKind::All => "all",
        }
    }
}

impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arrivals" | "a" => Ok(TableKind::Arrivals),
            "departures" | "d" => Ok(TableKind::Departures),
            "all" | "" => Ok(TableKind::All),
            other => Err(format!("unknown table kind: {}", other)),
        }
    }
}

/// Months that have at least one flight of the given kind.
pub fn month_tabs(occurrences: &[&FlightOccurrence], kind: TableKind) -> Vec<MonthEntry> {
    let rows: Vec<&FlightOccurrence> = occurrences
        .iter()
        .copied()
        .filter(|o| kind.admits(o))
        .collect();
    calendar::months(&rows)
}

/// Flights of one month and kind sorted by date, restricted to `weeks` when
/// that list is not empty.
pub fn month_rows<'a>(
    occurrences: &[&'a FlightOccurrence],
    kind: TableKind,
    year: i32,
    month: u32,
    weeks: &[u32],
) -> Vec<&'a FlightOccurrence> {
    let mut rows: Vec<&FlightOccurrence> = calendar::in_month(occurrences, year, month)
        .into_iter()
        .filter(|o| kind.admits(o))
        .filter(|o| weeks.is_empty() || weeks.contains(&o.week))
        .collect();
    rows.sort_by_key(|o| o.date);
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a table. `start_row` and `end_row` are 1-based and inclusive;
/// both are 0 for an empty table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightPage {
    pub rows: Vec<FlightOccurrence>,
    pub page: usize,
    pub page_size: usize,
    pub start_row: usize,
    pub end_row: usize,
    pub total_rows: usize,
    pub total_pages: usize,
}

pub fn clamp_page_size(page_size: usize) -> usize {
    page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
}

pub fn paginate(rows: &[&FlightOccurrence], request: PageRequest) -> FlightPage {
    let page_size = clamp_page_size(request.page_size);
    let total_rows = rows.len();
    let total_pages = total_rows.div_ceil(page_size);
    let page = request.page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * page_size).min(total_rows);
    let end = (start + page_size).min(total_rows);

    FlightPage {
        rows: rows[start..end].iter().map(|o| (*o).clone()).collect(),
        page,
        page_size,
        start_row: if end > start { start + 1 } else { 0 },
        end_row: end,
        total_rows,
        total_pages,
    }
}
