//! In-memory session repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::api::{SessionId, SessionInfo};
use crate::db::repository::{
    ErrorContext, RepositoryError, RepositoryResult, SessionRepository,
};
use crate::models::flight::FlightTable;

#[derive(Debug, Clone)]
struct SessionEntry {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    table: Arc<FlightTable>,
}

impl SessionEntry {
    fn info(&self, id: SessionId) -> SessionInfo {
        SessionInfo {
            id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            total_flights: self.table.len(),
            files: self
                .table
                .report
                .as_ref()
                .map(|r| r.accepted_files().map(|f| f.name.clone()).collect())
                .unwrap_or_default(),
        }
    }
}

/// Session map guarded by a `parking_lot::RwLock`. Tables are stored behind
/// `Arc` so readers never hold the lock while aggregating.
#[derive(Debug, Default)]
pub struct LocalRepository {
    sessions: RwLock<HashMap<SessionId, SessionEntry>>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn missing(operation: &str, id: SessionId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("session {} does not exist", id),
            ErrorContext::session(operation, id),
        )
    }

    fn update_table(
        &self,
        operation: &str,
        id: SessionId,
        table: FlightTable,
    ) -> RepositoryResult<SessionInfo> {
        let mut sessions = self.sessions.write();
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| Self::missing(operation, id))?;
        entry.table = Arc::new(table);
        entry.updated_at = Utc::now();
        Ok(entry.info(id))
    }
}

#[async_trait]
impl SessionRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn create_session(&self) -> RepositoryResult<SessionInfo> {
        let id = SessionId::new();
        let now = Utc::now();
        let entry = SessionEntry {
            created_at: now,
            updated_at: now,
            table: Arc::new(FlightTable::default()),
        };
        let info = entry.info(id);
        self.sessions.write().insert(id, entry);
        log::info!("created session {}", id);
        Ok(info)
    }

    async fn list_sessions(&self) -> RepositoryResult<Vec<SessionInfo>> {
        let sessions = self.sessions.read();
        let mut infos: Vec<SessionInfo> = sessions
            .iter()
            .map(|(id, entry)| entry.info(*id))
            .collect();
        infos.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(infos)
    }

    async fn delete_session(&self, id: SessionId) -> RepositoryResult<()> {
        match self.sessions.write().remove(&id) {
            Some(_) => {
                log::info!("deleted session {}", id);
                Ok(())
            }
            None => Err(Self::missing("delete_session", id)),
        }
    }

    async fn replace_table(
        &self,
        id: SessionId,
        table: FlightTable,
    ) -> RepositoryResult<SessionInfo> {
        let flights = table.len();
        if let Some(report) = &table.report {
            if report.total_occurrences != flights {
                return Err(RepositoryError::validation_with_context(
                    format!(
                        "report counts {} flights but the table holds {}",
                        report.total_occurrences, flights
                    ),
                    ErrorContext::session("replace_table", id),
                ));
            }
        }
        let info = self.update_table("replace_table", id, table)?;
        log::info!("session {} now holds {} flights", id, flights);
        Ok(info)
    }

    async fn fetch_table(&self, id: SessionId) -> RepositoryResult<Arc<FlightTable>> {
        self.sessions
            .read()
            .get(&id)
            .map(|entry| Arc::clone(&entry.table))
            .ok_or_else(|| Self::missing("fetch_table", id))
    }

    async fn reset_table(&self, id: SessionId) -> RepositoryResult<SessionInfo> {
        let info = self.update_table("reset_table", id, FlightTable::default())?;
        log::info!("session {} table reset", id);
        Ok(info)
    }

    async fn session_count(&self) -> RepositoryResult<usize> {
        Ok(self.sessions.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::IngestReport;
    use crate::models::time::default_floor_date;
    use crate::services::test_fixtures::occurrence;

    fn table_with(count: usize) -> FlightTable {
        FlightTable {
            occurrences: (0..count)
                .map(|i| occurrence(&i.to_string(), "2025-01-06", "J", "A320"))
                .collect(),
            report: None,
        }
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let repo = LocalRepository::new();
        let info = repo.create_session().await.unwrap();
        assert_eq!(info.total_flights, 0);
        assert!(repo.fetch_table(info.id).await.unwrap().is_empty());

        let updated = repo.replace_table(info.id, table_with(3)).await.unwrap();
        assert_eq!(updated.total_flights, 3);
        assert_eq!(repo.fetch_table(info.id).await.unwrap().len(), 3);

        repo.reset_table(info.id).await.unwrap();
        assert!(repo.fetch_table(info.id).await.unwrap().is_empty());

        repo.delete_session(info.id).await.unwrap();
        assert_eq!(repo.session_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let repo = LocalRepository::new();
        let id = SessionId::new();
        assert!(repo.fetch_table(id).await.unwrap_err().is_not_found());
        assert!(repo.delete_session(id).await.unwrap_err().is_not_found());
        let err = repo.replace_table(id, table_with(1)).await.unwrap_err();
        assert_eq!(err.context().operation.as_deref(), Some("replace_table"));
    }

    #[tokio::test]
    async fn test_report_must_match_table() {
        let repo = LocalRepository::new();
        let id = repo.create_session().await.unwrap().id;
        let mut table = table_with(2);
        table.report = Some(IngestReport {
            files: vec![],
            warnings: vec![],
            total_occurrences: 3,
            floor_date: default_floor_date(),
            checksum: String::new(),
        });

        let err = repo.replace_table(id, table).await.unwrap_err();
        assert!(err.is_validation());
        assert!(repo.fetch_table(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_survives_replacement() {
        let repo = LocalRepository::new();
        let id = repo.create_session().await.unwrap().id;
        repo.replace_table(id, table_with(2)).await.unwrap();
        let snapshot = repo.fetch_table(id).await.unwrap();
        repo.replace_table(id, table_with(5)).await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(repo.fetch_table(id).await.unwrap().len(), 5);
    }
}
