//! Entry-store contract against a real PostgreSQL instance.
//!
//! Ignored by default; run with a database available:
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test store_pg -- --ignored
//! ```

use std::sync::Arc;

use chrono::{Duration, Utc};
use provider_cache::prelude::*;
use sqlx::PgPool;

async fn connect() -> Arc<PgPool> {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for pg tests");
    let pool = PgPool::connect(&url).await.expect("connect");
    sqlx::migrate!("./migrations").run(&pool).await.expect("migrate");
    Arc::new(pool)
}

/// Unique per run so repeated test invocations never see each other's rows.
fn unique_fingerprint(label: &str) -> Fingerprint {
    let nonce = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    Fingerprint::build(&format!("pg-test-{nonce}"), &format!("{label}.example.com"), None, &[])
        .unwrap()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_pg_round_trip() {
    let pool = connect().await;
    let store = PgEntryStore::new(pool, ResourceKind::BacklinkSummary);
    let fp = unique_fingerprint("roundtrip");

    store
        .upsert(NewEntry::complete(fp.clone(), b"blob".to_vec(), Duration::hours(1)))
        .await
        .unwrap();

    let entry = store.get(&fp).await.unwrap().expect("row should exist");
    assert_eq!(entry.payload.as_deref(), Some(b"blob".as_slice()));
    assert_eq!(entry.status, EntryStatus::Complete);
    assert_eq!(entry.expires_at, entry.written_at + Duration::hours(1));

    assert!(store.delete(&fp).await.unwrap());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_pg_upsert_overwrites() {
    let pool = connect().await;
    let store = PgEntryStore::new(pool, ResourceKind::BacklinkSummary);
    let fp = unique_fingerprint("overwrite");

    store
        .upsert(NewEntry::complete(fp.clone(), b"first".to_vec(), Duration::hours(1)))
        .await
        .unwrap();
    store
        .upsert(NewEntry::complete(fp.clone(), b"second".to_vec(), Duration::hours(2)))
        .await
        .unwrap();

    let entry = store.get(&fp).await.unwrap().expect("row should exist");
    assert_eq!(entry.payload.as_deref(), Some(b"second".as_slice()));

    assert!(store.delete(&fp).await.unwrap());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_pg_namespaces_are_isolated() {
    let pool = connect().await;
    let backlinks = PgEntryStore::new(pool.clone(), ResourceKind::BacklinkSummary);
    let audits = PgEntryStore::new(pool, ResourceKind::PerformanceAudit);
    let fp = unique_fingerprint("namespaces");

    backlinks
        .upsert(NewEntry::complete(fp.clone(), b"backlinks".to_vec(), Duration::hours(1)))
        .await
        .unwrap();

    assert!(audits.get(&fp).await.unwrap().is_none());
    assert!(backlinks.get(&fp).await.unwrap().is_some());

    assert!(backlinks.delete(&fp).await.unwrap());
    assert!(!audits.delete(&fp).await.unwrap());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_pg_failure_marker_round_trip() {
    let pool = connect().await;
    let store = PgEntryStore::new(pool, ResourceKind::SearchConsoleSnapshot);
    let fp = unique_fingerprint("marker");

    store
        .upsert(NewEntry::failed(fp.clone(), Duration::minutes(10)))
        .await
        .unwrap();

    let entry = store.get(&fp).await.unwrap().expect("row should exist");
    assert_eq!(entry.status, EntryStatus::Failed);
    assert!(entry.payload.is_none());

    assert!(store.delete(&fp).await.unwrap());
}
