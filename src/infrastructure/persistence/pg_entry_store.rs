//! PostgreSQL implementation of the entry store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{CacheEntry, EntryStatus, NewEntry, ResourceKind};
use crate::domain::fingerprint::Fingerprint;
use crate::domain::repositories::EntryStore;
use crate::error::CacheResult;

/// PostgreSQL store for cache entries, pinned to one resource namespace.
///
/// All rows live in a single `cache_entries` table keyed by
/// `(resource, fingerprint)`; each store instance only ever sees its own
/// namespace, so the same fingerprint in two resource families never
/// collides. Writes go through `ON CONFLICT DO UPDATE`, making the
/// per-row upsert atomic.
pub struct PgEntryStore {
    pool: Arc<PgPool>,
    resource: &'static str,
}

/// Row shape of the `cache_entries` table.
#[derive(sqlx::FromRow)]
struct EntryRow {
    fingerprint: String,
    payload: Option<Vec<u8>>,
    status: String,
    written_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl From<EntryRow> for CacheEntry {
    fn from(row: EntryRow) -> Self {
        CacheEntry {
            fingerprint: Fingerprint::from_digest(row.fingerprint),
            payload: row.payload,
            status: EntryStatus::parse(&row.status),
            written_at: row.written_at,
            expires_at: row.expires_at,
        }
    }
}

impl PgEntryStore {
    /// Creates a store scoped to one resource family.
    pub fn new(pool: Arc<PgPool>, resource: ResourceKind) -> Self {
        Self {
            pool,
            resource: resource.namespace(),
        }
    }
}

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn get(&self, fingerprint: &Fingerprint) -> CacheResult<Option<CacheEntry>> {
        let row = sqlx::query_as::<_, EntryRow>(
            r#"
            SELECT fingerprint, payload, status, written_at, expires_at
            FROM cache_entries
            WHERE resource = $1 AND fingerprint = $2
            "#,
        )
        .bind(self.resource)
        .bind(fingerprint.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(CacheEntry::from))
    }

    async fn upsert(&self, entry: NewEntry) -> CacheResult<()> {
        let written_at = Utc::now();
        let expires_at = written_at + entry.ttl;

        sqlx::query(
            r#"
            INSERT INTO cache_entries (resource, fingerprint, payload, status, written_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (resource, fingerprint)
            DO UPDATE SET
                payload = EXCLUDED.payload,
                status = EXCLUDED.status,
                written_at = EXCLUDED.written_at,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(self.resource)
        .bind(entry.fingerprint.as_str())
        .bind(entry.payload)
        .bind(entry.status.as_str())
        .bind(written_at)
        .bind(expires_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn delete(&self, fingerprint: &Fingerprint) -> CacheResult<bool> {
        let result = sqlx::query(
            "DELETE FROM cache_entries WHERE resource = $1 AND fingerprint = $2",
        )
        .bind(self.resource)
        .bind(fingerprint.as_str())
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> CacheResult<u64> {
        let result = sqlx::query(
            "DELETE FROM cache_entries WHERE resource = $1 AND expires_at < $2",
        )
        .bind(self.resource)
        .bind(cutoff)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }
}
