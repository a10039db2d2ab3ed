//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Sessions
        .route(
            "/sessions",
            get(handlers::list_sessions).post(handlers::create_session),
        )
        .route("/sessions/{session_id}", delete(handlers::delete_session))
        .route("/sessions/{session_id}/uploads", post(handlers::upload_files))
        .route("/sessions/{session_id}/flights", delete(handlers::reset_flights))
        .route("/sessions/{session_id}/report", get(handlers::get_report))
        .route("/sessions/{session_id}/options", get(handlers::get_options))
        // Calendar navigation and dashboards
        .route("/sessions/{session_id}/months", get(handlers::list_months))
        .route(
            "/sessions/{session_id}/months/{year}/{month}/weeks",
            get(handlers::list_weeks),
        )
        .route(
            "/sessions/{session_id}/months/{year}/{month}/weeks/{week}",
            get(handlers::get_weekly_dashboard),
        )
        .route(
            "/sessions/{session_id}/days/{date}",
            get(handlers::get_daily_dashboard),
        )
        // Tables and exports
        .route(
            "/sessions/{session_id}/months/{year}/{month}/flights",
            get(handlers::get_flight_table),
        )
        .route(
            "/sessions/{session_id}/months/{year}/{month}/export",
            get(handlers::export_month),
        )
        .route(
            "/sessions/{session_id}/days/{date}/export",
            get(handlers::export_day),
        );

    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
