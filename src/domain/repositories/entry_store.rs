//! Storage contract for cache entries.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{CacheEntry, NewEntry};
use crate::domain::fingerprint::Fingerprint;
use crate::error::CacheResult;

/// Persistent storage for cache entries, scoped to one resource namespace.
///
/// The store is the source of truth, not an L1: implementations do no
/// in-process caching of their own, and every operation is one storage
/// round trip. Storage failures surface as
/// [`CacheError::StorageUnavailable`]; deciding to degrade on them belongs
/// to the façade, never here.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgEntryStore`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryEntryStore`] - in-process,
///   used by tests and storage-less development
///
/// [`CacheError::StorageUnavailable`]: crate::error::CacheError::StorageUnavailable
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Fetches the entry for a fingerprint. Exact match only.
    async fn get(&self, fingerprint: &Fingerprint) -> CacheResult<Option<CacheEntry>>;

    /// Writes an entry, overwriting any existing row for the same
    /// fingerprint. The store stamps `written_at = now` and
    /// `expires_at = now + ttl`; the write is atomic per row, so concurrent
    /// upserts for one fingerprint resolve to last-writer-wins.
    async fn upsert(&self, entry: NewEntry) -> CacheResult<()>;

    /// Removes the entry for a fingerprint. Returns whether a row existed.
    async fn delete(&self, fingerprint: &Fingerprint) -> CacheResult<bool>;

    /// Removes every entry whose expiry passed before `cutoff` and returns
    /// the count. Used by the janitor; the cutoff normally lags `now` by a
    /// grace window so stale-fallback reads stay possible.
    async fn delete_expired(&self, cutoff: DateTime<Utc>) -> CacheResult<u64>;
}
