//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::repository::SessionRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Session store
    pub repository: Arc<dyn SessionRepository>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(repository: Arc<dyn SessionRepository>, config: AppConfig) -> Self {
        Self {
            repository,
            config: Arc::new(config),
        }
    }
}
