//! CSV export of occurrence rows.

use std::io::Write;

use chrono::NaiveDate;

use crate::models::flight::FlightOccurrence;

use super::flight_table::TableKind;

pub const EXPORT_COLUMNS: [&str; 16] = [
    "flight_number",
    "date",
    "day_name",
    "departure_time",
    "arrival_time",
    "origin",
    "destination",
    "flight_type",
    "station",
    "type",
    "aircraft_type",
    "source_file",
    "carrier",
    "year",
    "month",
    "week",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV output: {0}")]
    Io(#[from] std::io::Error),
}

pub fn month_file_name(kind: TableKind, month: u32) -> String {
    format!("horario_{}_{}.csv", kind.as_str(), month)
}

pub fn day_file_name(date: NaiveDate) -> String {
    format!("vuelos_{}.csv", date.format("%Y-%m-%d"))
}

fn record(o: &FlightOccurrence) -> [String; 16] {
    [
        o.flight_number.clone(),
        o.date.format("%Y-%m-%d").to_string(),
        o.day_name.to_string(),
        o.departure_time.to_string(),
        o.arrival_time.to_string(),
        o.origin.clone(),
        o.destination.clone(),
        o.flight_type.clone(),
        o.station.clone(),
        o.direction.code().to_string(),
        o.aircraft_type.clone(),
        o.source_file.clone(),
        o.carrier.clone(),
        o.year.to_string(),
        o.month.to_string(),
        o.week.to_string(),
    ]
}

/// Write the header and one record per occurrence, in the given order.
pub fn write_rows<'a, W, I>(rows: I, writer: &mut csv::Writer<W>) -> Result<(), ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a FlightOccurrence>,
{
    writer.write_record(EXPORT_COLUMNS)?;
    for row in rows {
        writer.write_record(record(row))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn to_csv_bytes<'a, I>(rows: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a FlightOccurrence>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_rows(rows, &mut writer)?;
    writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))
}
