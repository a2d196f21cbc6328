//! # provider-cache
//!
//! Caching layer for a marketing-analytics backend that aggregates results
//! from rate-limited, slow, and unreliable third-party data providers
//! (search-console APIs, backlink APIs, social scrapers, headless-browser
//! audits). Every external call goes through this layer, which decides
//! whether a previous result can be reused, for how long, under what key,
//! and what happens when a refresh attempt fails.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer
//! separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, fingerprint construction,
//!   the pure freshness policy, and the storage contract
//! - **Application Layer** ([`application`]) - The cache façade and the
//!   background janitor
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL and
//!   in-memory entry stores
//!
//! ## Usage
//!
//! ```no_run
//! use provider_cache::prelude::*;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = provider_cache::config::load_from_env()?;
//! let runtime = CacheRuntime::connect(&config).await?;
//! runtime.spawn_janitor(&config);
//!
//! let backlinks = runtime.cache(ResourceKind::BacklinkSummary);
//! let fingerprint = Fingerprint::build("user1", "acme.com", None, &[])?;
//!
//! match backlinks.lookup(&fingerprint, LookupMode::Normal).await {
//!     Lookup::Fresh(payload) => { /* serve it */ }
//!     _ => {
//!         let payload = b"...provider response...".to_vec();
//!         backlinks
//!             .store(&fingerprint, payload, chrono::Duration::hours(24))
//!             .await;
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Guarantees
//!
//! - At most one current value per fingerprint per resource family
//!   (row-level atomic upsert; last writer wins)
//! - A lookup in `Normal` mode never returns an expired entry; `AllowStale`
//!   returns expired entries explicitly labeled with their age
//! - A storage outage never fails a calling request: lookups degrade to
//!   misses and stores to logged no-ops
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod runtime;
pub mod utils;

pub use error::{CacheError, CacheResult};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::{CacheService, Janitor, Lookup};
    pub use crate::domain::entities::{CacheEntry, EntryStatus, NewEntry, ResourceKind};
    pub use crate::domain::fingerprint::Fingerprint;
    pub use crate::domain::freshness::{Decision, LookupMode, decide};
    pub use crate::domain::repositories::EntryStore;
    pub use crate::error::{CacheError, CacheResult};
    pub use crate::infrastructure::persistence::{MemoryEntryStore, PgEntryStore};
    pub use crate::runtime::CacheRuntime;
}
