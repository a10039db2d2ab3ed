//! Membership filters over the occurrence table.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::flight::FlightOccurrence;

/// One list per filterable attribute. An empty list places no restriction on
/// that attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightFilter {
    #[serde(default)]
    pub stations: Vec<String>,
    #[serde(default)]
    pub flight_types: Vec<String>,
    #[serde(default)]
    pub dates: Vec<NaiveDate>,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub carriers: Vec<String>,
    #[serde(default)]
    pub aircraft_types: Vec<String>,
}

fn admits<T: PartialEq>(allowed: &[T], value: &T) -> bool {
    allowed.is_empty() || allowed.contains(value)
}

impl FlightFilter {
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
            && self.flight_types.is_empty()
            && self.dates.is_empty()
            && self.sources.is_empty()
            && self.carriers.is_empty()
            && self.aircraft_types.is_empty()
    }

    pub fn matches(&self, occurrence: &FlightOccurrence) -> bool {
        admits(&self.stations, &occurrence.station)
            && admits(&self.flight_types, &occurrence.flight_type)
            && admits(&self.dates, &occurrence.date)
            && admits(&self.sources, &occurrence.source_file)
            && admits(&self.carriers, &occurrence.carrier)
            && admits(&self.aircraft_types, &occurrence.aircraft_type)
    }

    /// Matching occurrences, in table order.
    pub fn apply<'a>(&self, occurrences: &'a [FlightOccurrence]) -> Vec<&'a FlightOccurrence> {
        occurrences.iter().filter(|o| self.matches(o)).collect()
    }
}

/// Values offered for each filter, taken from the whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub stations: Vec<String>,
    pub flight_types: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub sources: Vec<String>,
    pub carriers: Vec<String>,
    pub aircraft_types: Vec<String>,
}

fn distinct<T: Ord + Clone>(values: impl Iterator<Item = T>) -> Vec<T> {
    values.collect::<BTreeSet<_>>().into_iter().collect()
}

impl FilterOptions {
    pub fn from_occurrences(occurrences: &[FlightOccurrence]) -> Self {
        Self {
            stations: distinct(occurrences.iter().map(|o| o.station.clone())),
            flight_types: distinct(occurrences.iter().map(|o| o.flight_type.clone())),
            dates: distinct(occurrences.iter().map(|o| o.date)),
            sources: distinct(occurrences.iter().map(|o| o.source_file.clone())),
            carriers: distinct(occurrences.iter().map(|o| o.carrier.clone())),
            aircraft_types: distinct(occurrences.iter().map(|o| o.aircraft_type.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_fixtures::occurrence;

    #[test]
    fn test_empty_filter_matches_everything() {
        let table = vec![
            occurrence("1", "2025-01-06", "J", "A320"),
            occurrence("2", "2025-01-07", "C", "B738"),
        ];
        let filter = FlightFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&table).len(), 2);
    }

    #[test]
    fn test_dimensions_are_conjunctive() {
        let table = vec![
            occurrence("1", "2025-01-06", "J", "A320"),
            occurrence("2", "2025-01-06", "C", "A320"),
            occurrence("3", "2025-01-07", "J", "B738"),
        ];
        let filter = FlightFilter {
            flight_types: vec!["J".to_string()],
            aircraft_types: vec!["A320".to_string(), "E195".to_string()],
            ..Default::default()
        };
        let numbers: Vec<&str> = filter
            .apply(&table)
            .iter()
            .map(|o| o.flight_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["1"]);
    }

    #[test]
    fn test_date_filter() {
        let table = vec![
            occurrence("1", "2025-01-06", "J", "A320"),
            occurrence("2", "2025-01-07", "J", "A320"),
        ];
        let filter = FlightFilter {
            dates: vec![NaiveDate::from_ymd_opt(2025, 1, 7).unwrap()],
            ..Default::default()
        };
        assert_eq!(filter.apply(&table)[0].flight_number, "2");
    }

    #[test]
    fn test_options_are_sorted_and_distinct() {
        let table = vec![
            occurrence("1", "2025-01-07", "J", "B738"),
            occurrence("2", "2025-01-06", "C", "A320"),
            occurrence("3", "2025-01-06", "J", "A320"),
        ];
        let options = FilterOptions::from_occurrences(&table);
        assert_eq!(options.flight_types, vec!["C", "J"]);
        assert_eq!(options.aircraft_types, vec!["A320", "B738"]);
        assert_eq!(options.dates.len(), 2);
        assert!(options.dates[0] < options.dates[1]);
    }

    #[test]
    fn test_options_of_empty_table() {
        assert_eq!(FilterOptions::from_occurrences(&[]), FilterOptions::default());
    }
}
