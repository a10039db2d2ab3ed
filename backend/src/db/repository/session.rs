//! Session repository trait.
//!
//! A session owns exactly one flight table. Uploads replace the table
//! wholesale; every read hands out a shared, immutable snapshot.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::{SessionId, SessionInfo};
use crate::models::flight::FlightTable;

/// Storage for per-session flight tables.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across axum handlers.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Check that the storage backend is usable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Create a session holding an empty table.
    async fn create_session(&self) -> RepositoryResult<SessionInfo>;

    /// List all sessions, oldest first.
    async fn list_sessions(&self) -> RepositoryResult<Vec<SessionInfo>>;

    /// Drop a session and its table.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If the session does not exist
    async fn delete_session(&self, id: SessionId) -> RepositoryResult<()>;

    /// Replace the session's table with the result of a new upload.
    async fn replace_table(&self, id: SessionId, table: FlightTable)
        -> RepositoryResult<SessionInfo>;

    /// Current table of the session.
    async fn fetch_table(&self, id: SessionId) -> RepositoryResult<Arc<FlightTable>>;

    /// Empty the session's table, keeping the session.
    async fn reset_table(&self, id: SessionId) -> RepositoryResult<SessionInfo>;

    /// Number of live sessions.
    async fn session_count(&self) -> RepositoryResult<usize>;
}
