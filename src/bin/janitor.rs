//! Standalone cache janitor.
//!
//! Deletes expired cache entries on a fixed interval, independent of the
//! dashboard backend's request traffic. Run it as a long-lived sidecar, or
//! with `--once` from cron/systemd-timer for scheduled sweeps.
//!
//! # Usage
//!
//! ```bash
//! # Sweep forever on the configured interval
//! cargo run --bin janitor
//!
//! # One sweep, then exit (for cron)
//! cargo run --bin janitor -- --once
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `SWEEP_INTERVAL_SECONDS`, `SWEEP_GRACE_SECONDS`: sweep tuning
//! - `RUST_LOG`, `LOG_FORMAT`: logging

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use provider_cache::config::{self, Config};
use provider_cache::runtime::CacheRuntime;

/// Expired-entry sweeper for the provider cache.
#[derive(Parser)]
#[command(name = "janitor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Run a single sweep and exit instead of looping
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    init_tracing(&config);
    config.print_summary();

    let runtime = CacheRuntime::connect(&config).await?;
    let janitor = runtime.janitor(&config);

    if cli.once {
        let removed = janitor.sweep().await;
        tracing::info!("Sweep complete, {removed} entries removed");
        return Ok(());
    }

    tokio::select! {
        _ = janitor.run() => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
