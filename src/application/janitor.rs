//! Background expiry sweeper.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::domain::repositories::EntryStore;

/// Deletes expired cache entries on a fixed interval, independent of read
/// traffic.
///
/// The sweep cutoff lags the clock by a grace window: an entry that expired
/// less than `grace` ago survives the sweep so `AllowStale` readers can
/// still fall back to it. Deletion of already-stale rows is always safe to
/// interleave with reads and writes (a racing read sees either the
/// not-yet-deleted row or a miss, both valid), so the janitor takes no
/// locks.
pub struct Janitor {
    stores: Vec<Arc<dyn EntryStore>>,
    interval: StdDuration,
    grace: Duration,
}

impl Janitor {
    /// Creates a janitor over one store per resource namespace.
    pub fn new(stores: Vec<Arc<dyn EntryStore>>, interval: StdDuration, grace: Duration) -> Self {
        Self {
            stores,
            interval,
            grace,
        }
    }

    /// Runs one sweep across all stores and returns the number of rows
    /// deleted. A store that fails is logged and skipped; one broken
    /// namespace never stops the others from being cleaned.
    pub async fn sweep(&self) -> u64 {
        let cutoff = Utc::now() - self.grace;
        let mut total = 0u64;

        for store in &self.stores {
            match store.delete_expired(cutoff).await {
                Ok(count) => total += count,
                Err(e) => warn!("janitor sweep failed for one namespace: {e}"),
            }
        }

        if total > 0 {
            info!("janitor removed {total} expired cache entries");
        } else {
            debug!("janitor sweep found nothing to remove");
        }
        total
    }

    /// Sweeps immediately, then on every interval tick, forever.
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.sweep().await;
        }
    }
}
