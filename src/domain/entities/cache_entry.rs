//! Cache entry row types.

use chrono::{DateTime, Duration, Utc};

use crate::domain::fingerprint::Fingerprint;

/// Write status of a cache entry.
///
/// A `Failed` entry records that the underlying provider fetch failed, with
/// no payload, so that callers can back off instead of re-fetching on every
/// request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Complete,
    Failed,
}

impl EntryStatus {
    /// Storage representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }

    /// Parses the storage representation. Unknown values read as `Complete`
    /// so that rows written by a newer schema revision stay servable.
    pub fn parse(s: &str) -> Self {
        match s {
            "failed" => Self::Failed,
            _ => Self::Complete,
        }
    }
}

/// One cached result for one fingerprint.
///
/// The payload is an opaque blob; the cache never interprets its structure.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fingerprint: Fingerprint,
    pub payload: Option<Vec<u8>>,
    pub status: EntryStatus,
    pub written_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Returns true once the entry's expiry has passed.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Time elapsed since the entry was written.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.written_at
    }
}

/// Input for an entry-store upsert.
///
/// The store stamps `written_at = now` and `expires_at = now + ttl` at write
/// time, so callers only supply the TTL.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub fingerprint: Fingerprint,
    pub payload: Option<Vec<u8>>,
    pub status: EntryStatus,
    pub ttl: Duration,
}

impl NewEntry {
    /// A successful-fetch entry carrying a payload.
    pub fn complete(fingerprint: Fingerprint, payload: Vec<u8>, ttl: Duration) -> Self {
        Self {
            fingerprint,
            payload: Some(payload),
            status: EntryStatus::Complete,
            ttl,
        }
    }

    /// A payload-less marker recording a failed provider fetch.
    pub fn failed(fingerprint: Fingerprint, ttl: Duration) -> Self {
        Self {
            fingerprint,
            payload: None,
            status: EntryStatus::Failed,
            ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(written_offset_secs: i64, ttl_secs: i64) -> CacheEntry {
        let written_at = Utc::now() + Duration::seconds(written_offset_secs);
        CacheEntry {
            fingerprint: Fingerprint::from_digest("0".repeat(64)),
            payload: Some(b"{}".to_vec()),
            status: EntryStatus::Complete,
            written_at,
            expires_at: written_at + Duration::seconds(ttl_secs),
        }
    }

    #[test]
    fn test_entry_not_expired_before_ttl() {
        let e = entry(-10, 3600);
        assert!(!e.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_entry_expired_after_ttl() {
        let e = entry(-7200, 3600);
        assert!(e.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_entry_expired_exactly_at_boundary() {
        let e = entry(-60, 60);
        assert!(e.is_expired_at(e.expires_at));
    }

    #[test]
    fn test_entry_age() {
        let e = entry(-90, 3600);
        let age = e.age_at(Utc::now());
        assert!(age >= Duration::seconds(90));
        assert!(age < Duration::seconds(95));
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(EntryStatus::parse("complete"), EntryStatus::Complete);
        assert_eq!(EntryStatus::parse("failed"), EntryStatus::Failed);
        assert_eq!(EntryStatus::parse("something-new"), EntryStatus::Complete);
        assert_eq!(EntryStatus::Failed.as_str(), "failed");
    }

    #[test]
    fn test_new_entry_constructors() {
        let fp = Fingerprint::from_digest("a".repeat(64));
        let complete = NewEntry::complete(fp.clone(), b"data".to_vec(), Duration::hours(1));
        assert_eq!(complete.status, EntryStatus::Complete);
        assert_eq!(complete.payload.as_deref(), Some(b"data".as_slice()));

        let failed = NewEntry::failed(fp, Duration::minutes(10));
        assert_eq!(failed.status, EntryStatus::Failed);
        assert!(failed.payload.is_none());
    }
}
