//! Column layout of an uploaded schedule.

use super::error::FileError;

pub const COL_DIRECTION: &str = "A/D";
pub const COL_FLIGHT_NUMBER: &str = "fltno";
pub const COL_DEPARTURE_TIME: &str = "departure_time";
pub const COL_ARRIVAL_TIME: &str = "arrival_time";
pub const COL_ORIGIN: &str = "origin";
pub const COL_DESTINATION: &str = "dest";
pub const COL_STATION: &str = "STATION";
pub const COL_WEEKDAY: &str = "weekday";
pub const COL_FROM_DATE: &str = "from_date";
pub const COL_UNTIL_DATE: &str = "until_date";
pub const COL_FLIGHT_TYPE: &str = "flight_type";
pub const COL_AIRCRAFT_TYPE: &str = "actypeadv";
pub const COL_CARRIER: &str = "carrier";

/// Every column a file must carry to be accepted.
pub const REQUIRED_COLUMNS: [&str; 13] = [
    COL_DIRECTION,
    COL_FLIGHT_NUMBER,
    COL_DEPARTURE_TIME,
    COL_ARRIVAL_TIME,
    COL_ORIGIN,
    COL_DESTINATION,
    COL_STATION,
    COL_WEEKDAY,
    COL_FROM_DATE,
    COL_UNTIL_DATE,
    COL_FLIGHT_TYPE,
    COL_AIRCRAFT_TYPE,
    COL_CARRIER,
];

/// Positions of the required columns inside a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIndex {
    pub direction: usize,
    pub flight_number: usize,
    pub departure_time: usize,
    pub arrival_time: usize,
    pub origin: usize,
    pub destination: usize,
    pub station: usize,
    pub weekday: usize,
    pub from_date: usize,
    pub until_date: usize,
    pub flight_type: usize,
    pub aircraft_type: usize,
    pub carrier: usize,
}

impl ColumnIndex {
    /// Locate every required column. Header names are matched exactly after
    /// trimming; extra columns are ignored. All missing columns are reported
    /// together.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Result<Self, FileError> {
        let position = |name: &str| headers.iter().position(|h| h.as_ref().trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| position(**name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(FileError::MissingColumns { columns: missing });
        }

        let at = |name: &str| position(name).unwrap_or_default();
        Ok(Self {
            direction: at(COL_DIRECTION),
            flight_number: at(COL_FLIGHT_NUMBER),
            departure_time: at(COL_DEPARTURE_TIME),
            arrival_time: at(COL_ARRIVAL_TIME),
            origin: at(COL_ORIGIN),
            destination: at(COL_DESTINATION),
            station: at(COL_STATION),
            weekday: at(COL_WEEKDAY),
            from_date: at(COL_FROM_DATE),
            until_date: at(COL_UNTIL_DATE),
            flight_type: at(COL_FLIGHT_TYPE),
            aircraft_type: at(COL_AIRCRAFT_TYPE),
            carrier: at(COL_CARRIER),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_columns_found_in_any_order() {
        let mut headers: Vec<&str> = REQUIRED_COLUMNS.to_vec();
        headers.reverse();
        headers.insert(3, "remarks");
        let index = ColumnIndex::from_headers(&headers).unwrap();
        assert_eq!(headers[index.carrier], "carrier");
        assert_eq!(headers[index.direction], "A/D");
        assert_eq!(headers[index.aircraft_type], "actypeadv");
    }

    #[test]
    fn test_headers_trimmed() {
        let headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|h| format!(" {} ", h)).collect();
        assert!(ColumnIndex::from_headers(&headers).is_ok());
    }

    #[test]
    fn test_missing_carrier_rejected() {
        let headers: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|h| *h != COL_CARRIER)
            .collect();
        let err = ColumnIndex::from_headers(&headers).unwrap_err();
        assert_eq!(
            err,
            FileError::MissingColumns {
                columns: vec!["carrier".to_string()]
            }
        );
    }

    #[test]
    fn test_station_is_case_sensitive() {
        let headers: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .map(|h| if *h == COL_STATION { "station".to_string() } else { h.to_string() })
            .collect();
        assert!(matches!(
            ColumnIndex::from_headers(&headers),
            Err(FileError::MissingColumns { columns }) if columns == vec!["STATION".to_string()]
        ));
    }
}
