//! Dashboard aggregations: weekly and daily count matrices, hourly and
//! aircraft-type distributions, and the per-day aircraft series.
//!
//! Every function takes an already filtered slice of occurrences; none of them
//! fail. An empty slice yields empty rows or zero-filled buckets.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::flight::FlightOccurrence;
use crate::models::schedule::Direction;
use crate::models::time::day_label;

/// Placeholder rendered for a zero count.
pub const EMPTY_CELL: &str = "-";

pub const HOURS_PER_DAY: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    FlightType,
    AircraftType,
}

/// Row dimension shared by the weekly and daily matrices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowKey {
    pub kind: RowKind,
    pub label: String,
}

impl RowKey {
    fn matches(&self, occurrence: &FlightOccurrence) -> bool {
        match self.kind {
            RowKind::FlightType => occurrence.flight_type == self.label,
            RowKind::AircraftType => occurrence.aircraft_type == self.label,
        }
    }
}

fn render_count(count: usize) -> String {
    if count == 0 {
        EMPTY_CELL.to_string()
    } else {
        count.to_string()
    }
}

/// Sorted flight types followed by sorted aircraft types.
pub fn row_keys(occurrences: &[&FlightOccurrence]) -> Vec<RowKey> {
    let flight_types: BTreeSet<&str> = occurrences.iter().map(|o| o.flight_type.as_str()).collect();
    let aircraft_types: BTreeSet<&str> =
        occurrences.iter().map(|o| o.aircraft_type.as_str()).collect();

    flight_types
        .into_iter()
        .map(|label| RowKey {
            kind: RowKind::FlightType,
            label: label.to_string(),
        })
        .chain(aircraft_types.into_iter().map(|label| RowKey {
            kind: RowKind::AircraftType,
            label: label.to_string(),
        }))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub kind: RowKind,
    pub label: String,
    pub counts: Vec<usize>,
    /// `counts` rendered for display, zero as [`EMPTY_CELL`].
    pub cells: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyMatrix {
    pub columns: Vec<NaiveDate>,
    /// `MM-DD` header per column.
    pub headers: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

/// Count matrix of a week: one row per flight type and aircraft type present,
/// one column per date in `columns` (which may include days without flights).
pub fn weekly_matrix(week: &[&FlightOccurrence], columns: &[NaiveDate]) -> WeeklyMatrix {
    let rows = row_keys(week)
        .into_iter()
        .map(|key| {
            let counts: Vec<usize> = columns
                .iter()
                .map(|day| {
                    week.iter()
                        .filter(|o| o.date == *day && key.matches(o))
                        .count()
                })
                .collect();
            MatrixRow {
                cells: counts.iter().copied().map(render_count).collect(),
                total: counts.iter().sum(),
                counts,
                kind: key.kind,
                label: key.label,
            }
        })
        .collect();

    WeeklyMatrix {
        columns: columns.to_vec(),
        headers: columns.iter().map(|d| d.format("%m-%d").to_string()).collect(),
        rows,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRow {
    pub kind: RowKind,
    pub label: String,
    pub count: usize,
    pub cell: String,
}

/// Per-type counts for one day, using the row set of the surrounding week so
/// that types absent on that day still show as `-`.
pub fn daily_matrix(week: &[&FlightOccurrence], date: NaiveDate) -> Vec<DailyRow> {
    row_keys(week)
        .into_iter()
        .map(|key| {
            let count = week
                .iter()
                .filter(|o| o.date == date && key.matches(o))
                .count();
            DailyRow {
                kind: key.kind,
                label: key.label,
                count,
                cell: render_count(count),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    pub hour: u32,
    pub arrivals: usize,
    pub departures: usize,
}

/// Flights per hour of day split by direction. Always 24 buckets; flights
/// whose time is `N/A` are left out.
pub fn hourly_distribution(day: &[&FlightOccurrence]) -> Vec<HourBucket> {
    let mut buckets: Vec<HourBucket> = (0..HOURS_PER_DAY)
        .map(|hour| HourBucket {
            hour,
            arrivals: 0,
            departures: 0,
        })
        .collect();

    for occurrence in day {
        let Some(hour) = occurrence.scheduled_time().hour() else {
            continue;
        };
        if let Some(bucket) = buckets.get_mut(hour as usize) {
            match occurrence.direction {
                Direction::Arrival => bucket.arrivals += 1,
                Direction::Departure => bucket.departures += 1,
            }
        }
    }
    buckets
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AircraftShare {
    pub aircraft_type: String,
    pub count: usize,
    /// Share of the total, rounded to two decimals.
    pub percentage: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Flights per aircraft type, most frequent first (ties by name).
pub fn aircraft_distribution(occurrences: &[&FlightOccurrence]) -> Vec<AircraftShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for o in occurrences {
        *counts.entry(o.aircraft_type.as_str()).or_default() += 1;
    }
    let total = occurrences.len();

    let mut shares: Vec<AircraftShare> = counts
        .into_iter()
        .map(|(aircraft_type, count)| AircraftShare {
            aircraft_type: aircraft_type.to_string(),
            count,
            percentage: round2(count as f64 / total as f64 * 100.0),
        })
        .collect();
    shares.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.aircraft_type.cmp(&b.aircraft_type))
    });
    shares
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyAircraftPoint {
    pub date: NaiveDate,
    pub label: String,
    pub aircraft_type: String,
    pub count: usize,
}

/// Count for every (day, aircraft type) pair of the week, zero-filled,
/// ordered by date then type.
pub fn daily_aircraft_series(
    week: &[&FlightOccurrence],
    columns: &[NaiveDate],
) -> Vec<DailyAircraftPoint> {
    let aircraft_types: BTreeSet<&str> = week.iter().map(|o| o.aircraft_type.as_str()).collect();
    let mut counts: BTreeMap<(NaiveDate, &str), usize> = BTreeMap::new();
    for o in week {
        *counts.entry((o.date, o.aircraft_type.as_str())).or_default() += 1;
    }

    let mut days = columns.to_vec();
    days.sort();
    days.dedup();

    days.into_iter()
        .flat_map(|date| {
            let label = day_label(date);
            let counts = &counts;
            aircraft_types.iter().map(move |aircraft| DailyAircraftPoint {
                date,
                label: label.clone(),
                aircraft_type: aircraft.to_string(),
                count: counts.get(&(date, *aircraft)).copied().unwrap_or(0),
            })
        })
        .collect()
}

fn detail_order(a: &FlightOccurrence, b: &FlightOccurrence) -> Ordering {
    a.arrival_time
        .cmp(&b.arrival_time)
        .then_with(|| a.departure_time.cmp(&b.departure_time))
        .then_with(|| a.flight_number.cmp(&b.flight_number))
}

/// A day's flights ordered by arrival time, then departure time, then flight
/// number. `N/A` sorts after every clock time.
pub fn day_detail<'a>(day: &[&'a FlightOccurrence]) -> Vec<&'a FlightOccurrence> {
    let mut rows = day.to_vec();
    rows.sort_by(|a, b| detail_order(a, b));
    rows
}

#[cfg(test)]
#[path = "aggregation_tests.rs"]
mod aggregation_tests;
