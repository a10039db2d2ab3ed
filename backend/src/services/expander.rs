//! Recurrence expansion: schedule templates into dated flights.

use chrono::NaiveDate;

use crate::models::flight::FlightOccurrence;
use crate::models::schedule::ScheduleTemplate;
use crate::models::time::weekday_number;

/// Clipped date range `[max(valid_from, floor), valid_until]` over which a
/// template is expanded. `None` when the range is empty.
pub fn effective_window(
    template: &ScheduleTemplate,
    floor: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    let start = template.valid_from.max(floor);
    let end = template.valid_until;
    (start <= end).then_some((start, end))
}

/// Lazily produce one occurrence per day of the effective window whose
/// weekday is in the template's mask.
pub fn expand_template(
    template: &ScheduleTemplate,
    floor: NaiveDate,
) -> impl Iterator<Item = FlightOccurrence> + '_ {
    let days = effective_window(template, floor)
        .into_iter()
        .flat_map(|(start, end)| start.iter_days().take_while(move |d| *d <= end));

    days.filter(move |date| template.weekdays.contains_number(weekday_number(*date)))
        .map(move |date| FlightOccurrence::from_template(template, date))
}

/// Expand every template, keeping template order and date order within each
/// template.
pub fn expand_all(templates: &[ScheduleTemplate], floor: NaiveDate) -> Vec<FlightOccurrence> {
    templates
        .iter()
        .flat_map(|template| expand_template(template, floor))
        .collect()
}
