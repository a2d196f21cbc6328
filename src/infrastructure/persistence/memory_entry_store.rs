//! In-process implementation of the entry store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::entities::{CacheEntry, EntryStatus, NewEntry};
use crate::domain::fingerprint::Fingerprint;
use crate::domain::repositories::EntryStore;
use crate::error::{CacheError, CacheResult};

/// An entry store backed by a process-local map.
///
/// Semantics match [`PgEntryStore`] row for row, which makes it the store
/// of choice for integration tests and for development environments without
/// a database. State dies with the process; each instance is its own
/// namespace.
///
/// [`PgEntryStore`]: crate::infrastructure::persistence::PgEntryStore
#[derive(Default)]
pub struct MemoryEntryStore {
    rows: RwLock<HashMap<String, StoredRow>>,
}

#[derive(Clone)]
struct StoredRow {
    payload: Option<Vec<u8>>,
    status: EntryStatus,
    written_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held. Test helper.
    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// A poisoned lock means a writer panicked mid-update; surface it the same
// way a dead database connection would surface.
fn poisoned() -> CacheError {
    CacheError::StorageUnavailable("entry map lock poisoned".to_string())
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn get(&self, fingerprint: &Fingerprint) -> CacheResult<Option<CacheEntry>> {
        let rows = self.rows.read().map_err(|_| poisoned())?;

        Ok(rows.get(fingerprint.as_str()).map(|row| CacheEntry {
            fingerprint: fingerprint.clone(),
            payload: row.payload.clone(),
            status: row.status,
            written_at: row.written_at,
            expires_at: row.expires_at,
        }))
    }

    async fn upsert(&self, entry: NewEntry) -> CacheResult<()> {
        let written_at = Utc::now();
        let row = StoredRow {
            payload: entry.payload,
            status: entry.status,
            written_at,
            expires_at: written_at + entry.ttl,
        };

        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        rows.insert(entry.fingerprint.as_str().to_string(), row);
        Ok(())
    }

    async fn delete(&self, fingerprint: &Fingerprint) -> CacheResult<bool> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        Ok(rows.remove(fingerprint.as_str()).is_some())
    }

    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> CacheResult<u64> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let before = rows.len();
        rows.retain(|_, row| row.expires_at >= cutoff);
        Ok((before - rows.len()) as u64)
    }
}
