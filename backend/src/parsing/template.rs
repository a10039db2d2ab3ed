//! Typing of one spreadsheet row into a [`ScheduleTemplate`].

use chrono::NaiveDate;

use super::cell::CellValue;
use super::columns::*;
use super::error::RecordError;
use crate::models::schedule::{Direction, ScheduleTemplate, WeekdayMask};
use crate::models::time::{FlightTime, NOT_APPLICABLE};

static EMPTY: CellValue = CellValue::Empty;

/// Longest validity window a single row may declare. Expansion of one row is
/// bounded by this many days.
pub const MAX_VALIDITY_DAYS: i64 = 3660;

fn cell<'a>(row: &'a [CellValue], index: usize) -> &'a CellValue {
    row.get(index).unwrap_or(&EMPTY)
}

fn required_text(
    row: &[CellValue],
    index: usize,
    column: &'static str,
) -> Result<String, RecordError> {
    cell(row, index)
        .as_text()
        .ok_or(RecordError::MissingField { column })
}

fn optional_text(row: &[CellValue], index: usize) -> String {
    cell(row, index).as_text().unwrap_or_default()
}

fn required_date(
    row: &[CellValue],
    index: usize,
    column: &'static str,
) -> Result<NaiveDate, RecordError> {
    let value = cell(row, index);
    if value.is_empty() {
        return Err(RecordError::MissingField { column });
    }
    value.as_date().ok_or_else(|| RecordError::InvalidDate {
        column,
        value: value.as_text().unwrap_or_default(),
    })
}

fn flight_time(value: &CellValue) -> FlightTime {
    value
        .as_number()
        .map(FlightTime::from_hhmm)
        .unwrap_or(FlightTime::NotApplicable)
}

/// Build a template from one data row.
///
/// Direction, flight number, station, weekday and both validity dates are
/// required. Times that cannot be read become `N/A`, a blank aircraft type
/// becomes `N/A`, and the remaining descriptive columns may be blank. A
/// validity window longer than [`MAX_VALIDITY_DAYS`] is rejected; an
/// inverted one is accepted and simply expands to nothing.
pub fn template_from_row(
    columns: &ColumnIndex,
    row: &[CellValue],
    source: &str,
) -> Result<ScheduleTemplate, RecordError> {
    let direction_text = required_text(row, columns.direction, COL_DIRECTION)?;
    let direction = Direction::parse(&direction_text).ok_or(RecordError::InvalidDirection {
        value: direction_text,
    })?;

    let flight_number = required_text(row, columns.flight_number, COL_FLIGHT_NUMBER)?;
    let station = required_text(row, columns.station, COL_STATION)?;
    let weekday_text = required_text(row, columns.weekday, COL_WEEKDAY)?;
    let valid_from = required_date(row, columns.from_date, COL_FROM_DATE)?;
    let valid_until = required_date(row, columns.until_date, COL_UNTIL_DATE)?;
    if (valid_until - valid_from).num_days() > MAX_VALIDITY_DAYS {
        return Err(RecordError::WindowTooLong {
            from: valid_from,
            until: valid_until,
            max_days: MAX_VALIDITY_DAYS,
        });
    }

    let scheduled_time = match direction {
        Direction::Departure => flight_time(cell(row, columns.departure_time)),
        Direction::Arrival => flight_time(cell(row, columns.arrival_time)),
    };

    let aircraft_type = cell(row, columns.aircraft_type)
        .as_text()
        .unwrap_or_else(|| NOT_APPLICABLE.to_string());

    Ok(ScheduleTemplate {
        flight_number,
        direction,
        scheduled_time,
        origin: optional_text(row, columns.origin),
        destination: optional_text(row, columns.destination),
        station,
        flight_type: optional_text(row, columns.flight_type),
        aircraft_type,
        carrier: optional_text(row, columns.carrier),
        weekdays: WeekdayMask::parse(&weekday_text),
        valid_from,
        valid_until,
        source: source.to_string(),
    })
}
