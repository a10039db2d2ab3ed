//! Schedule templates: one uploaded row describing a recurring flight.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::time::FlightTime;

/// Whether the flight arrives at or departs from the station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "A")]
    Arrival,
    #[serde(rename = "D")]
    Departure,
}

impl Direction {
    /// Parse the `A/D` flag, ignoring case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "A" | "a" => Some(Direction::Arrival),
            "D" | "d" => Some(Direction::Departure),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Direction::Arrival => "A",
            Direction::Departure => "D",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Set of weekdays a template recurs on, parsed from a digit string where
/// `1` is Monday and `7` is Sunday.
///
/// Parsing is lenient: characters that are not digits 1-7 are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdayMask(u8);

impl WeekdayMask {
    pub fn parse(text: &str) -> Self {
        let bits = text
            .chars()
            .filter_map(|c| c.to_digit(10))
            .filter(|d| (1..=7).contains(d))
            .fold(0u8, |acc, d| acc | 1 << (d - 1));
        WeekdayMask(bits)
    }

    /// Membership test on a 1 (Monday) .. 7 (Sunday) weekday number.
    pub fn contains_number(&self, number: u8) -> bool {
        (1..=7).contains(&number) && self.0 & (1 << (number - 1)) != 0
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        self.contains_number(weekday.number_from_monday() as u8)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Weekday numbers in the mask, ascending.
    pub fn numbers(&self) -> Vec<u8> {
        (1..=7).filter(|n| self.contains_number(*n)).collect()
    }
}

impl fmt::Display for WeekdayMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for n in self.numbers() {
            write!(f, "{}", n)?;
        }
        Ok(())
    }
}

impl Serialize for WeekdayMask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One typed row of an uploaded schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleTemplate {
    pub flight_number: String,
    pub direction: Direction,
    /// Departure time for departures, arrival time for arrivals.
    pub scheduled_time: FlightTime,
    pub origin: String,
    pub destination: String,
    pub station: String,
    pub flight_type: String,
    pub aircraft_type: String,
    pub carrier: String,
    pub weekdays: WeekdayMask,
    pub valid_from: NaiveDate,
    pub valid_until: NaiveDate,
    /// Name of the file the row came from.
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::parse("A"), Some(Direction::Arrival));
        assert_eq!(Direction::parse(" d "), Some(Direction::Departure));
        assert_eq!(Direction::parse("X"), None);
        assert_eq!(Direction::parse(""), None);
    }

    #[test]
    fn test_weekday_mask_digits() {
        let mask = WeekdayMask::parse("135");
        assert_eq!(mask.numbers(), vec![1, 3, 5]);
        assert!(mask.contains(Weekday::Mon));
        assert!(!mask.contains(Weekday::Tue));
        assert_eq!(mask.to_string(), "135");
    }

    #[test]
    fn test_weekday_mask_skips_garbage() {
        let mask = WeekdayMask::parse("1.x7 90");
        assert_eq!(mask.numbers(), vec![1, 7]);
    }

    #[test]
    fn test_weekday_mask_empty() {
        assert!(WeekdayMask::parse("abc").is_empty());
        assert!(WeekdayMask::parse("").is_empty());
        assert!(!WeekdayMask::parse("0089").contains_number(0));
    }

    #[test]
    fn test_weekday_mask_duplicates_collapse() {
        assert_eq!(WeekdayMask::parse("1177").numbers(), vec![1, 7]);
    }
}
