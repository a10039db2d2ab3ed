//! Concrete, dated flights produced by expanding schedule templates.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::report::IngestReport;
use super::schedule::{Direction, ScheduleTemplate};
use super::time::{weekday_name, FlightTime};

/// One dated flight.
///
/// Grouping keys (`year`, `month`, `week`, `iso_year`) are computed once at
/// creation so views never recompute them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlightOccurrence {
    pub flight_number: String,
    pub date: NaiveDate,
    pub day_name: &'static str,
    pub departure_time: FlightTime,
    pub arrival_time: FlightTime,
    pub origin: String,
    pub destination: String,
    pub flight_type: String,
    pub station: String,
    pub direction: Direction,
    pub aircraft_type: String,
    pub source_file: String,
    pub carrier: String,
    pub year: i32,
    pub month: u32,
    /// ISO week number.
    pub week: u32,
    /// Year the ISO week belongs to (differs from `year` around New Year).
    pub iso_year: i32,
}

impl FlightOccurrence {
    /// Materialize the occurrence of `template` on `date`. The time column that
    /// does not match the direction is always `N/A`.
    pub fn from_template(template: &ScheduleTemplate, date: NaiveDate) -> Self {
        let (departure_time, arrival_time) = match template.direction {
            Direction::Departure => (template.scheduled_time, FlightTime::NotApplicable),
            Direction::Arrival => (FlightTime::NotApplicable, template.scheduled_time),
        };
        let iso = date.iso_week();

        Self {
            flight_number: template.flight_number.clone(),
            date,
            day_name: weekday_name(date.weekday()),
            departure_time,
            arrival_time,
            origin: template.origin.clone(),
            destination: template.destination.clone(),
            flight_type: template.flight_type.clone(),
            station: template.station.clone(),
            direction: template.direction,
            aircraft_type: template.aircraft_type.clone(),
            source_file: template.source.clone(),
            carrier: template.carrier.clone(),
            year: date.year(),
            month: date.month(),
            week: iso.week(),
            iso_year: iso.year(),
        }
    }

    /// The time matching the flight's direction.
    pub fn scheduled_time(&self) -> FlightTime {
        match self.direction {
            Direction::Departure => self.departure_time,
            Direction::Arrival => self.arrival_time,
        }
    }

    pub fn is_arrival(&self) -> bool {
        self.direction == Direction::Arrival
    }

    pub fn is_departure(&self) -> bool {
        self.direction == Direction::Departure
    }
}

/// The occurrence table owned by one session, together with the report of the
/// upload that produced it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlightTable {
    pub occurrences: Vec<FlightOccurrence>,
    pub report: Option<IngestReport>,
}

impl FlightTable {
    pub fn new(occurrences: Vec<FlightOccurrence>, report: IngestReport) -> Self {
        Self {
            occurrences,
            report: Some(report),
        }
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::WeekdayMask;

    fn template(direction: Direction) -> ScheduleTemplate {
        ScheduleTemplate {
            flight_number: "IB3120".to_string(),
            direction,
            scheduled_time: FlightTime::from_hhmm(1015.0),
            origin: "MAD".to_string(),
            destination: "LHR".to_string(),
            station: "MAD".to_string(),
            flight_type: "J".to_string(),
            aircraft_type: "A320".to_string(),
            carrier: "IB".to_string(),
            weekdays: WeekdayMask::parse("1234567"),
            valid_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
            source: "winter.xlsx".to_string(),
        }
    }

    #[test]
    fn test_departure_fills_departure_time_only() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let occurrence = FlightOccurrence::from_template(&template(Direction::Departure), date);
        assert_eq!(occurrence.departure_time.to_string(), "10:15");
        assert_eq!(occurrence.arrival_time, FlightTime::NotApplicable);
        assert_eq!(occurrence.scheduled_time().to_string(), "10:15");
        assert_eq!(occurrence.day_name, "Monday");
    }

    #[test]
    fn test_arrival_fills_arrival_time_only() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let occurrence = FlightOccurrence::from_template(&template(Direction::Arrival), date);
        assert_eq!(occurrence.departure_time, FlightTime::NotApplicable);
        assert_eq!(occurrence.arrival_time.to_string(), "10:15");
        assert!(occurrence.is_arrival());
    }

    #[test]
    fn test_grouping_keys_cached() {
        // 2024-12-30 belongs to ISO week 1 of 2025
        let date = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        let occurrence = FlightOccurrence::from_template(&template(Direction::Departure), date);
        assert_eq!(occurrence.year, 2024);
        assert_eq!(occurrence.month, 12);
        assert_eq!(occurrence.week, 1);
        assert_eq!(occurrence.iso_year, 2025);
    }
}
