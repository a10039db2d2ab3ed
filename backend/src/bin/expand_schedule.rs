//! Expand schedule spreadsheets into a dated flight list on stdout.
//!
//! # Usage
//!
//! ```bash
//! expand_schedule [--floor YYYY-MM-DD] <file.xlsx|file.csv>...
//! ```
//!
//! Rejected rows and files are logged to stderr; the merged occurrences are
//! written as CSV to stdout.

use std::env;
use std::fs;
use std::io;

use anyhow::{bail, Context, Result};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use flight_calendar::config::AppConfig;
use flight_calendar::models::time::parse_date_text;
use flight_calendar::services::export::write_rows;
use flight_calendar::services::ingest::{ingest_files, IngestError, UploadedFile};

const USAGE: &str = "usage: expand_schedule [--floor YYYY-MM-DD] <file>...";

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_writer(io::stderr)
        .init();

    let mut config = AppConfig::load().context("Failed to load configuration")?;
    let mut paths = Vec::new();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--floor" => {
                let value = args.next().context(USAGE)?;
                config.calendar.floor_date = parse_date_text(&value)
                    .with_context(|| format!("Invalid floor date: {}", value))?;
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => paths.push(arg),
        }
    }
    if paths.is_empty() {
        bail!(USAGE);
    }

    let files = paths
        .iter()
        .map(|path| {
            let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path))?;
            Ok(UploadedFile::new(path.clone(), bytes))
        })
        .collect::<Result<Vec<_>>>()?;

    let outcome = match ingest_files(&files, config.calendar.floor_date) {
        Ok(outcome) => outcome,
        Err(IngestError::NoValidFiles { report }) => {
            for warning in &report.warnings {
                warn!("{}: {}", warning.source, warning.message);
            }
            bail!("No valid files to process");
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        "{} flights from {} file(s)",
        outcome.report.total_occurrences,
        outcome.report.accepted_files().count()
    );

    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());
    write_rows(&outcome.occurrences, &mut writer).context("Failed to write CSV")?;
    Ok(())
}
