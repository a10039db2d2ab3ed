//! Occurrence builders shared by the service unit tests.

use chrono::NaiveDate;

use crate::models::flight::FlightOccurrence;
use crate::models::schedule::{Direction, ScheduleTemplate, WeekdayMask};
use crate::models::time::FlightTime;

fn parse(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
}

/// Departure at 09:00 at station MAD, carrier IB.
pub(crate) fn occurrence(
    number: &str,
    date: &str,
    flight_type: &str,
    aircraft_type: &str,
) -> FlightOccurrence {
    timed(number, date, Direction::Departure, 900.0, flight_type, aircraft_type)
}

pub(crate) fn timed(
    number: &str,
    date: &str,
    direction: Direction,
    hhmm: f64,
    flight_type: &str,
    aircraft_type: &str,
) -> FlightOccurrence {
    let date = parse(date);
    let template = ScheduleTemplate {
        flight_number: number.to_string(),
        direction,
        scheduled_time: FlightTime::from_hhmm(hhmm),
        origin: "LHR".to_string(),
        destination: "MAD".to_string(),
        station: "MAD".to_string(),
        flight_type: flight_type.to_string(),
        aircraft_type: aircraft_type.to_string(),
        carrier: "IB".to_string(),
        weekdays: WeekdayMask::parse("1234567"),
        valid_from: date,
        valid_until: date,
        source: "fixture.csv".to_string(),
    };
    FlightOccurrence::from_template(&template, date)
}
