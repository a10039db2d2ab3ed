//! Flight Calendar HTTP Server Binary
//!
//! Loads configuration, creates the in-memory session store, sets up the
//! HTTP router and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin flight-calendar-server
//!
//! PORT=9000 FLIGHT_CALENDAR_FLOOR_DATE=2025-03-01 \
//!   cargo run --bin flight-calendar-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `FLIGHT_CALENDAR_FLOOR_DATE`: Earliest date to generate flights for (default: 2025-01-01)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use flight_calendar::config::AppConfig;
use flight_calendar::db::{LocalRepository, SessionRepository};
use flight_calendar::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Flight Calendar HTTP Server");

    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        "Generating flights from {} onwards",
        config.calendar.floor_date
    );

    let repository: Arc<dyn SessionRepository> = Arc::new(LocalRepository::new());
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_address()))?;

    let state = AppState::new(repository, config);
    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
