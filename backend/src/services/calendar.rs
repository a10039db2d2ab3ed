//! Month, week and day navigation over a filtered occurrence set.
//!
//! Every list is chronological regardless of the order the occurrences were
//! loaded in. Weeks are ISO weeks, always scoped to one calendar month, so a
//! week that straddles a month boundary shows up in both months with only the
//! days that fall inside each.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::flight::FlightOccurrence;
use crate::models::time::{day_label, month_name};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthEntry {
    pub year: i32,
    pub month: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekEntry {
    pub week: u32,
    pub iso_year: i32,
    /// Earliest flight date of the week inside the month.
    pub start: NaiveDate,
    /// Latest flight date of the week inside the month.
    pub end: NaiveDate,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub day_name: &'static str,
    pub label: String,
}

pub fn month_label(year: i32, month: u32) -> String {
    format!("{} {}", month_name(month), year)
}

pub fn week_label(week: u32, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "Week {} ({} - {})",
        week,
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

/// Distinct (year, month) pairs present, oldest first.
pub fn months(occurrences: &[&FlightOccurrence]) -> Vec<MonthEntry> {
    occurrences
        .iter()
        .map(|o| (o.year, o.month))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(|(year, month)| MonthEntry {
            year,
            month,
            label: month_label(year, month),
        })
        .collect()
}

pub fn in_month<'a>(
    occurrences: &[&'a FlightOccurrence],
    year: i32,
    month: u32,
) -> Vec<&'a FlightOccurrence> {
    occurrences
        .iter()
        .copied()
        .filter(|o| o.year == year && o.month == month)
        .collect()
}

/// ISO weeks with at least one flight in the month, with the date span each
/// covers inside that month.
pub fn weeks(occurrences: &[&FlightOccurrence], year: i32, month: u32) -> Vec<WeekEntry> {
    let mut spans: BTreeMap<(i32, u32), (NaiveDate, NaiveDate)> = BTreeMap::new();
    for o in in_month(occurrences, year, month) {
        spans
            .entry((o.iso_year, o.week))
            .and_modify(|(start, end)| {
                *start = (*start).min(o.date);
                *end = (*end).max(o.date);
            })
            .or_insert((o.date, o.date));
    }

    spans
        .into_iter()
        .map(|((iso_year, week), (start, end))| WeekEntry {
            week,
            iso_year,
            start,
            end,
            label: week_label(week, start, end),
        })
        .collect()
}

/// Flights of one ISO week inside one month. Week numbers are unique within
/// a month, so the ISO year does not need to be given.
pub fn in_week<'a>(
    occurrences: &[&'a FlightOccurrence],
    year: i32,
    month: u32,
    week: u32,
) -> Vec<&'a FlightOccurrence> {
    occurrences
        .iter()
        .copied()
        .filter(|o| o.year == year && o.month == month && o.week == week)
        .collect()
}

/// Distinct flight dates, oldest first.
pub fn days(occurrences: &[&FlightOccurrence]) -> Vec<DayEntry> {
    occurrences
        .iter()
        .map(|o| (o.date, o.day_name))
        .collect::<BTreeMap<_, _>>()
        .into_iter()
        .map(|(date, day_name)| DayEntry {
            date,
            day_name,
            label: day_label(date),
        })
        .collect()
}

pub fn on_day<'a>(
    occurrences: &[&'a FlightOccurrence],
    date: NaiveDate,
) -> Vec<&'a FlightOccurrence> {
    occurrences
        .iter()
        .copied()
        .filter(|o| o.date == date)
        .collect()
}
