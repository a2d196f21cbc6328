//! Freshness policy.
//!
//! The single authoritative rule for whether a stored entry may be served.
//! Every cached resource family uses this same table; only the TTL written
//! at store time differs between them.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::CacheEntry;

/// How a caller wants freshness applied to its lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// Serve only unexpired entries.
    Normal,
    /// Treat even an unexpired entry as a miss; the caller intends to
    /// refetch regardless.
    ForceRefresh,
    /// Serve an expired entry rather than nothing. Used as an explicit
    /// fallback step after an upstream fetch has failed.
    AllowStale,
}

/// Outcome of applying the freshness rule to a stored entry.
#[derive(Debug, Clone)]
pub enum Decision {
    /// The entry is within its TTL.
    Fresh(CacheEntry),
    /// The entry is past its TTL but was requested under
    /// [`LookupMode::AllowStale`]. `age` is measured from `written_at`.
    Stale { entry: CacheEntry, age: Duration },
    /// Nothing servable; the caller must fetch live data.
    Miss,
}

/// Applies the freshness table. Pure; the only clock is the `now` argument.
///
/// | entry | mode | decision |
/// |---|---|---|
/// | absent | any | `Miss` |
/// | unexpired | `Normal` / `AllowStale` | `Fresh` |
/// | unexpired | `ForceRefresh` | `Miss` |
/// | expired | `Normal` / `ForceRefresh` | `Miss` |
/// | expired | `AllowStale` | `Stale` |
pub fn decide(entry: Option<CacheEntry>, now: DateTime<Utc>, mode: LookupMode) -> Decision {
    let Some(entry) = entry else {
        return Decision::Miss;
    };

    match (entry.is_expired_at(now), mode) {
        (false, LookupMode::Normal | LookupMode::AllowStale) => Decision::Fresh(entry),
        (false, LookupMode::ForceRefresh) => Decision::Miss,
        (true, LookupMode::Normal | LookupMode::ForceRefresh) => Decision::Miss,
        (true, LookupMode::AllowStale) => {
            let age = entry.age_at(now);
            Decision::Stale { entry, age }
        }
    }
}
