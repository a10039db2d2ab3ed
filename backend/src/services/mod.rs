//! Service layer: everything between the parsed templates and the HTTP
//! handlers.
//!
//! Ingestion expands uploads into an occurrence table; the remaining modules
//! are pure functions over a filtered slice of that table and recompute their
//! views on every call.

pub mod aggregation;
pub mod calendar;
pub mod dashboard;
pub mod expander;
pub mod export;
pub mod filtering;
pub mod flight_table;
pub mod ingest;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use dashboard::{daily_dashboard, day_flights, weekly_dashboard, DailyDashboard, WeeklyDashboard};
pub use expander::{effective_window, expand_all, expand_template};
pub use export::{day_file_name, month_file_name, to_csv_bytes, ExportError};
pub use filtering::{FilterOptions, FlightFilter};
pub use flight_table::{month_rows, month_tabs, paginate, FlightPage, PageRequest, TableKind};
pub use ingest::{ingest_files, IngestError, IngestOutcome, UploadedFile};
