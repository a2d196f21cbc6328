//! Runtime wiring: pool construction, migrations, façade handout, janitor.
//!
//! The embedding backend builds one [`CacheRuntime`] at startup and asks it
//! for a [`CacheService`] per resource family. Nothing here is global; every
//! handle is explicitly constructed from the runtime's pool.

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::application::{CacheService, Janitor};
use crate::config::Config;
use crate::domain::entities::ResourceKind;
use crate::domain::repositories::EntryStore;
use crate::infrastructure::persistence::PgEntryStore;

/// Owns the PostgreSQL pool behind every per-resource cache façade.
pub struct CacheRuntime {
    pool: Arc<PgPool>,
}

impl CacheRuntime {
    /// Connects the pool with the configured tuning and applies migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or a migration fails.
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
            .idle_timeout(Duration::from_secs(config.db_idle_timeout))
            .max_lifetime(Duration::from_secs(config.db_max_lifetime))
            .connect(&config.database_url)
            .await
            .context("Failed to connect to database")?;
        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to migrate")?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// A façade over the given resource family's namespace.
    pub fn cache(&self, kind: ResourceKind) -> CacheService<PgEntryStore> {
        CacheService::new(Arc::new(PgEntryStore::new(self.pool.clone(), kind)))
    }

    /// A janitor covering every resource namespace.
    pub fn janitor(&self, config: &Config) -> Janitor {
        let stores = ResourceKind::ALL
            .iter()
            .map(|kind| {
                Arc::new(PgEntryStore::new(self.pool.clone(), *kind)) as Arc<dyn EntryStore>
            })
            .collect();

        Janitor::new(stores, config.sweep_interval(), config.sweep_grace())
    }

    /// Spawns the janitor loop onto the current runtime.
    pub fn spawn_janitor(&self, config: &Config) -> tokio::task::JoinHandle<()> {
        let janitor = self.janitor(config);
        let handle = tokio::spawn(janitor.run());
        tracing::info!(
            "Janitor started (every {}s, grace {}s)",
            config.sweep_interval_secs,
            config.sweep_grace_secs
        );
        handle
    }

    /// The underlying pool, for callers that share it with other subsystems.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
