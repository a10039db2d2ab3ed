//! Calendar and clock helpers shared by parsing, expansion and aggregation.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Serialize, Serializer};
use std::fmt;

/// Text used wherever a time does not apply or could not be read.
pub const NOT_APPLICABLE: &str = "N/A";

/// Date formats accepted for `from_date` / `until_date` text cells.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// First day that is ever expanded unless the configuration says otherwise.
pub fn default_floor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

/// Scheduled clock time of a flight, or the "not applicable" sentinel.
///
/// Clock times order before `NotApplicable`, so sorting a day by time puts
/// flights without a usable time last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlightTime {
    At(NaiveTime),
    NotApplicable,
}

impl FlightTime {
    /// Interpret a numeric `HHMM` value (e.g. `930` → `09:30`).
    ///
    /// Fractional values are truncated. Negative values and values that do not
    /// form a valid clock time map to `NotApplicable`.
    pub fn from_hhmm(value: f64) -> Self {
        if !value.is_finite() || value < 0.0 {
            return FlightTime::NotApplicable;
        }
        let hhmm = value.trunc() as u32;
        NaiveTime::from_hms_opt(hhmm / 100, hhmm % 100, 0)
            .map(FlightTime::At)
            .unwrap_or(FlightTime::NotApplicable)
    }

    /// Interpret a text cell holding an `HHMM` number. Anything non-numeric is
    /// `NotApplicable`.
    pub fn parse_hhmm(text: &str) -> Self {
        text.trim()
            .parse::<f64>()
            .map(Self::from_hhmm)
            .unwrap_or(FlightTime::NotApplicable)
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, FlightTime::At(_))
    }

    /// Hour of day, when a clock time is present.
    pub fn hour(&self) -> Option<u32> {
        match self {
            FlightTime::At(time) => Some(time.hour()),
            FlightTime::NotApplicable => None,
        }
    }
}

impl fmt::Display for FlightTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightTime::At(time) => write!(f, "{}", time.format("%H:%M")),
            FlightTime::NotApplicable => f.write_str(NOT_APPLICABLE),
        }
    }
}

impl Serialize for FlightTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a date from spreadsheet text, accepting ISO dates, ISO date-times and
/// the common day/month layouts.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Convert a spreadsheet serial day number (1900 date system) to a date.
pub fn date_from_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_signed(Duration::days(serial.trunc() as i64))
}

/// Weekday number with Monday = 1 .. Sunday = 7.
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}

/// `"Monday 2025-01-06"` style label used for day pickers and chart axes.
pub fn day_label(date: NaiveDate) -> String {
    format!("{} {}", weekday_name(date.weekday()), date.format("%Y-%m-%d"))
}

/// Every date of the ISO week `(iso_year, week)` that falls inside the given
/// calendar month, in calendar order.
pub fn iso_week_days_in_month(iso_year: i32, week: u32, year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(monday) = NaiveDate::from_isoywd_opt(iso_year, week, Weekday::Mon) else {
        return Vec::new();
    };
    monday
        .iter_days()
        .take(7)
        .filter(|d| d.year() == year && d.month() == month)
        .collect()
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod time_tests;
