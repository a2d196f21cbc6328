#![allow(dead_code)]

use std::sync::Arc;

use provider_cache::prelude::*;

/// Façade over a fresh in-memory store, plus the store handle for
/// assertions on row counts and for seeding rows the façade would refuse
/// to write (e.g. already-expired ones).
pub fn memory_cache() -> (CacheService<MemoryEntryStore>, Arc<MemoryEntryStore>) {
    let store = Arc::new(MemoryEntryStore::new());
    (CacheService::new(store.clone()), store)
}

pub fn fingerprint_for(subject: &str, domain: &str) -> Fingerprint {
    Fingerprint::build(subject, domain, None, &[]).unwrap()
}

/// Inserts an entry whose expiry already passed `expired_secs_ago` seconds
/// ago, bypassing the façade's TTL validation.
pub async fn seed_expired(store: &MemoryEntryStore, fingerprint: &Fingerprint, expired_secs_ago: i64) {
    store
        .upsert(NewEntry::complete(
            fingerprint.clone(),
            b"expired payload".to_vec(),
            chrono::Duration::seconds(-expired_secs_ago),
        ))
        .await
        .unwrap();
}
