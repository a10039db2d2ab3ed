//! Session isolation and concurrent access through the service layer.

mod support;

use std::sync::Arc;

use flight_calendar::api::SessionId;
use flight_calendar::db::{store_upload, session_table, LocalRepository, SessionRepository, UploadError};
use flight_calendar::models::time::default_floor_date;
use flight_calendar::services::ingest::{IngestError, UploadedFile};
use support::{csv_with_header, schedule_csv, HEADER_WITHOUT_CARRIER};

fn daily_schedule(flight_number: &str) -> UploadedFile {
    let row = format!("D,{flight_number},800,,MAD,LHR,MAD,1234567,2025-01-01,2025-01-10,J,A320,IB");
    UploadedFile::new(format!("{flight_number}.csv"), schedule_csv(&[row.as_str()]))
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let repo = LocalRepository::new();
    let a = repo.create_session().await.unwrap().id;
    let b = repo.create_session().await.unwrap().id;

    store_upload(&repo, a, vec![daily_schedule("IB1")], default_floor_date())
        .await
        .unwrap();

    assert_eq!(session_table(&repo, a).await.unwrap().len(), 10);
    assert!(session_table(&repo, b).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_uploads() {
    let repo = Arc::new(LocalRepository::new());
    let mut handles = Vec::new();

    for i in 0..8 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            let id = repo.create_session().await.unwrap().id;
            let files = vec![daily_schedule(&format!("IB{i}"))];
            store_upload(repo.as_ref(), id, files, default_floor_date())
                .await
                .unwrap();
            id
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }

    assert_eq!(repo.session_count().await.unwrap(), 8);
    for (i, id) in ids.into_iter().enumerate() {
        let table = session_table(repo.as_ref(), id).await.unwrap();
        assert_eq!(table.len(), 10);
        let expected = format!("IB{i}");
        assert!(table.occurrences.iter().all(|o| o.flight_number == expected));
    }
}

#[tokio::test]
async fn test_snapshot_survives_replacement() {
    let repo = LocalRepository::new();
    let id = repo.create_session().await.unwrap().id;

    store_upload(&repo, id, vec![daily_schedule("IB1")], default_floor_date())
        .await
        .unwrap();
    let before = session_table(&repo, id).await.unwrap();

    store_upload(&repo, id, vec![daily_schedule("IB2")], default_floor_date())
        .await
        .unwrap();
    let after = session_table(&repo, id).await.unwrap();

    assert_eq!(before.occurrences[0].flight_number, "IB1");
    assert_eq!(after.occurrences[0].flight_number, "IB2");
}

#[tokio::test]
async fn test_rejected_upload_clears_table() {
    let repo = LocalRepository::new();
    let id = repo.create_session().await.unwrap().id;
    store_upload(&repo, id, vec![daily_schedule("IB1")], default_floor_date())
        .await
        .unwrap();

    let bad = UploadedFile::new(
        "bad.csv",
        csv_with_header(
            HEADER_WITHOUT_CARRIER,
            &["D,1,800,,MAD,LHR,MAD,1,2025-01-01,2025-01-10,J,A320"],
        ),
    );
    let err = store_upload(&repo, id, vec![bad], default_floor_date())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        UploadError::Ingest(IngestError::NoValidFiles { .. })
    ));
    assert!(session_table(&repo, id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_and_deleted_sessions() {
    let repo = LocalRepository::new();
    let unknown = SessionId::new();

    let err = store_upload(&repo, unknown, vec![daily_schedule("IB1")], default_floor_date())
        .await
        .unwrap_err();
    assert!(matches!(err, UploadError::Repository(ref e) if e.is_not_found()));

    let id = repo.create_session().await.unwrap().id;
    repo.delete_session(id).await.unwrap();
    assert!(session_table(&repo, id).await.unwrap_err().is_not_found());
    assert_eq!(repo.session_count().await.unwrap(), 0);
}
