//! # Flight Calendar Backend
//!
//! Turns recurring flight schedules into a dated flight calendar.
//!
//! Airline schedule spreadsheets describe each flight once, as a template
//! with a validity range and a set of operating weekdays. This crate reads
//! those spreadsheets, expands every template into one concrete flight per
//! operating day, and serves weekly and daily dashboards, paginated tables
//! and CSV exports over the resulting occurrence table.
//!
//! ## Architecture
//!
//! - [`parsing`]: `.xlsx`/`.csv` reading, column validation, row typing
//! - [`models`]: templates, occurrences, times and the ingest report
//! - [`services`]: expansion, ingestion, filtering, calendar navigation,
//!   aggregation, flight tables and CSV export
//! - [`db`]: session repository and the service functions over it
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`api`]: types that cross the HTTP boundary

// RepositoryError carries rich context
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod parsing;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
