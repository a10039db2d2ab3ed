//! Weekly and daily dashboards assembled from the aggregation primitives.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::flight::FlightOccurrence;
use crate::models::time::{day_label, iso_week_days_in_month};

use super::aggregation::{
    aircraft_distribution, daily_aircraft_series, daily_matrix, day_detail, hourly_distribution,
    weekly_matrix, AircraftShare, DailyAircraftPoint, DailyRow, HourBucket, WeeklyMatrix,
};
use super::calendar::{self, DayEntry, WeekEntry};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyDashboard {
    pub year: i32,
    pub month: u32,
    pub week: WeekEntry,
    pub total_flights: usize,
    pub matrix: WeeklyMatrix,
    pub aircraft: Vec<AircraftShare>,
    pub daily_aircraft: Vec<DailyAircraftPoint>,
    pub days: Vec<DayEntry>,
}

/// Dashboard of ISO week `week` within `year`/`month`. `None` when that week
/// has no flights in the month.
pub fn weekly_dashboard(
    occurrences: &[&FlightOccurrence],
    year: i32,
    month: u32,
    week: u32,
) -> Option<WeeklyDashboard> {
    let week_entry = calendar::weeks(occurrences, year, month)
        .into_iter()
        .find(|w| w.week == week)?;
    let flights = calendar::in_week(occurrences, year, month, week);
    let columns = iso_week_days_in_month(week_entry.iso_year, week, year, month);

    log::debug!(
        "weekly dashboard {}-{:02} week {}: {} flights over {} days",
        year,
        month,
        week,
        flights.len(),
        columns.len()
    );

    Some(WeeklyDashboard {
        year,
        month,
        total_flights: flights.len(),
        matrix: weekly_matrix(&flights, &columns),
        aircraft: aircraft_distribution(&flights),
        daily_aircraft: daily_aircraft_series(&flights, &columns),
        days: calendar::days(&flights),
        week: week_entry,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyDashboard {
    pub date: NaiveDate,
    pub label: String,
    pub total_flights: usize,
    pub matrix: Vec<DailyRow>,
    pub aircraft: Vec<AircraftShare>,
    pub hourly: Vec<HourBucket>,
    pub flights: Vec<FlightOccurrence>,
}

/// Flights of `date` plus the week (within the same month) it belongs to,
/// which supplies the matrix rows.
fn day_and_week<'a>(
    occurrences: &[&'a FlightOccurrence],
    date: NaiveDate,
) -> (Vec<&'a FlightOccurrence>, Vec<&'a FlightOccurrence>) {
    let week = calendar::in_week(occurrences, date.year(), date.month(), date.iso_week().week());
    let day = calendar::on_day(&week, date);
    (day, week)
}

/// Sorted detail rows of one day.
pub fn day_flights<'a>(
    occurrences: &[&'a FlightOccurrence],
    date: NaiveDate,
) -> Vec<&'a FlightOccurrence> {
    day_detail(&calendar::on_day(occurrences, date))
}

/// Dashboard of one day. `None` when the day has no flights.
pub fn daily_dashboard(
    occurrences: &[&FlightOccurrence],
    date: NaiveDate,
) -> Option<DailyDashboard> {
    let (day, week) = day_and_week(occurrences, date);
    if day.is_empty() {
        return None;
    }

    Some(DailyDashboard {
        date,
        label: day_label(date),
        total_flights: day.len(),
        matrix: daily_matrix(&week, date),
        aircraft: aircraft_distribution(&day),
        hourly: hourly_distribution(&day),
        flights: day_detail(&day).into_iter().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_fixtures::occurrence;

    fn sample() -> Vec<FlightOccurrence> {
        vec![
            occurrence("1", "2025-01-06", "J", "A320"),
            occurrence("2", "2025-01-08", "C", "B738"),
            occurrence("3", "2025-01-13", "J", "A320"),
            occurrence("4", "2024-12-31", "J", "E195"),
        ]
    }

    #[test]
    fn test_weekly_dashboard() {
        let table = sample();
        let refs: Vec<&FlightOccurrence> = table.iter().collect();
        let dashboard = weekly_dashboard(&refs, 2025, 1, 2).unwrap();
        assert_eq!(dashboard.total_flights, 2);
        assert_eq!(dashboard.matrix.columns.len(), 7);
        assert_eq!(dashboard.days.len(), 2);
        assert_eq!(dashboard.daily_aircraft.len(), 14);
        assert_eq!(dashboard.week.label, "Week 2 (2025-01-06 - 2025-01-08)");
    }

    #[test]
    fn test_week_clipped_to_month() {
        let table = sample();
        let refs: Vec<&FlightOccurrence> = table.iter().collect();
        // ISO week 1 of 2025 has 30 and 31 December in 2024
        let december = weekly_dashboard(&refs, 2024, 12, 1).unwrap();
        assert_eq!(december.matrix.columns.len(), 2);
        assert_eq!(december.total_flights, 1);
        assert!(weekly_dashboard(&refs, 2025, 1, 1).is_none());
    }

    #[test]
    fn test_unknown_week_is_none() {
        let table = sample();
        let refs: Vec<&FlightOccurrence> = table.iter().collect();
        assert!(weekly_dashboard(&refs, 2025, 1, 40).is_none());
        assert!(weekly_dashboard(&[], 2025, 1, 2).is_none());
    }

    #[test]
    fn test_daily_dashboard_rows_from_week() {
        let table = sample();
        let refs: Vec<&FlightOccurrence> = table.iter().collect();
        let dashboard = daily_dashboard(&refs, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()).unwrap();
        assert_eq!(dashboard.label, "Monday 2025-01-06");
        assert_eq!(dashboard.total_flights, 1);
        // C, J, A320, B738 from the week; only J and A320 fly on Monday
        let cells: Vec<&str> = dashboard.matrix.iter().map(|r| r.cell.as_str()).collect();
        assert_eq!(cells, vec!["-", "1", "1", "-"]);
        assert_eq!(dashboard.hourly.len(), 24);
        assert_eq!(dashboard.hourly[9].departures, 1);
        assert_eq!(dashboard.aircraft[0].percentage, 100.0);
    }

    #[test]
    fn test_daily_dashboard_empty_day() {
        let table = sample();
        let refs: Vec<&FlightOccurrence> = table.iter().collect();
        assert!(daily_dashboard(&refs, NaiveDate::from_ymd_opt(2025, 1, 7).unwrap()).is_none());
        assert!(day_flights(&refs, NaiveDate::from_ymd_opt(2025, 1, 7).unwrap()).is_empty());
    }
}
