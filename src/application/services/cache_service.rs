//! The cache façade.
//!
//! The only entry point callers use. Orchestrates the entry store and the
//! freshness policy, and owns the degrade-gracefully contract: the cache is
//! a performance optimization, never a hard dependency, so a broken store
//! turns reads into misses and writes into no-ops instead of failing the
//! calling request.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, warn};

use crate::domain::entities::{EntryStatus, NewEntry};
use crate::domain::fingerprint::Fingerprint;
use crate::domain::freshness::{Decision, LookupMode, decide};
use crate::domain::repositories::EntryStore;
use crate::error::CacheResult;

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// An unexpired payload.
    Fresh(Vec<u8>),
    /// An expired payload served under [`LookupMode::AllowStale`]. Callers
    /// can use `age` to annotate the response ("showing data from N hours
    /// ago").
    Stale { payload: Vec<u8>, age: Duration },
    /// An unexpired failure marker: the last provider fetch for this
    /// fingerprint failed recently. Callers should back off rather than
    /// refetch immediately.
    FetchFailed { age: Duration },
    /// Nothing servable; fetch live data.
    Miss,
}

/// Cache façade over one resource family's entry store.
///
/// Stateless between calls; all state lives in the injected store, whose
/// per-row atomic upsert guarantees at most one current value per
/// fingerprint. Concurrent writers for the same fingerprint race and the
/// last one wins; there is no per-fingerprint locking and no request
/// coalescing, so two callers that both observe a miss may both fetch
/// upstream. With provider TTLs of hours to days that window is accepted.
pub struct CacheService<S: EntryStore> {
    entries: Arc<S>,
}

impl<S: EntryStore> CacheService<S> {
    /// Creates a façade over an explicitly injected store.
    pub fn new(entries: Arc<S>) -> Self {
        Self { entries }
    }

    /// Looks up the entry for `fingerprint` under the given mode.
    ///
    /// A storage outage is logged and reported as [`Lookup::Miss`], never
    /// an error, so callers can always fall through to a live fetch.
    pub async fn lookup(&self, fingerprint: &Fingerprint, mode: LookupMode) -> Lookup {
        let entry = match self.entries.get(fingerprint).await {
            Ok(entry) => entry,
            Err(e) => {
                warn!("cache read failed for {fingerprint}: {e}; treating as miss");
                return Lookup::Miss;
            }
        };

        let now = Utc::now();
        match decide(entry, now, mode) {
            Decision::Miss => {
                debug!("cache miss: {fingerprint} ({mode:?})");
                Lookup::Miss
            }
            Decision::Fresh(entry) => {
                let age = entry.age_at(now);
                match (entry.status, entry.payload) {
                    (EntryStatus::Complete, Some(payload)) => {
                        debug!("cache hit: {fingerprint} (age {}s)", age.num_seconds());
                        Lookup::Fresh(payload)
                    }
                    (EntryStatus::Failed, _) => {
                        debug!(
                            "cache holds failure marker: {fingerprint} (age {}s)",
                            age.num_seconds()
                        );
                        Lookup::FetchFailed { age }
                    }
                    (EntryStatus::Complete, None) => {
                        warn!("complete entry without payload: {fingerprint}; treating as miss");
                        Lookup::Miss
                    }
                }
            }
            Decision::Stale { entry, age } => match (entry.status, entry.payload) {
                (EntryStatus::Complete, Some(payload)) => {
                    debug!(
                        "cache stale hit: {fingerprint} (age {}s)",
                        age.num_seconds()
                    );
                    Lookup::Stale { payload, age }
                }
                // An expired failure marker carries nothing worth serving.
                _ => {
                    debug!("cache miss: {fingerprint} (stale marker)");
                    Lookup::Miss
                }
            },
        }
    }

    /// Writes a successful fetch result with the given TTL.
    ///
    /// Returns whether the write happened. A non-positive TTL is rejected
    /// and a storage outage degrades to a logged `false`; neither raises.
    pub async fn store(&self, fingerprint: &Fingerprint, payload: Vec<u8>, ttl: Duration) -> bool {
        if ttl <= Duration::zero() {
            warn!(
                "refusing cache write with non-positive ttl ({}s): {fingerprint}",
                ttl.num_seconds()
            );
            return false;
        }

        let entry = NewEntry::complete(fingerprint.clone(), payload, ttl);
        self.write(entry, "store").await
    }

    /// Records that the provider fetch for `fingerprint` failed, without a
    /// payload, so that subsequent lookups within `ttl` answer
    /// [`Lookup::FetchFailed`] instead of triggering a refetch storm.
    pub async fn store_failure(&self, fingerprint: &Fingerprint, ttl: Duration) -> bool {
        if ttl <= Duration::zero() {
            warn!(
                "refusing failure marker with non-positive ttl ({}s): {fingerprint}",
                ttl.num_seconds()
            );
            return false;
        }

        let entry = NewEntry::failed(fingerprint.clone(), ttl);
        self.write(entry, "store_failure").await
    }

    /// Explicit cache-bust for manual refresh and cleanup actions. Returns
    /// whether an entry existed. Unlike `lookup`/`store`, a storage outage
    /// is surfaced: the caller asked for a deletion and needs to know it
    /// did not happen.
    pub async fn invalidate(&self, fingerprint: &Fingerprint) -> CacheResult<bool> {
        let existed = self.entries.delete(fingerprint).await?;
        if existed {
            debug!("cache invalidated: {fingerprint}");
        }
        Ok(existed)
    }

    async fn write(&self, entry: NewEntry, op: &str) -> bool {
        let fingerprint = entry.fingerprint.clone();
        let ttl = entry.ttl;

        match self.entries.upsert(entry).await {
            Ok(()) => {
                debug!(
                    "cache {op}: {fingerprint} (ttl {}s)",
                    ttl.num_seconds()
                );
                true
            }
            Err(e) => {
                warn!("cache {op} failed for {fingerprint}: {e}; continuing without cache");
                false
            }
        }
    }
}
