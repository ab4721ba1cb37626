//! Player API binary for the Xiuxian exploration service.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `xiuxian-config.yaml` (or `CONFIG_PATH`)
//! 2. Initialize structured logging (tracing)
//! 3. Open the store: `PostgreSQL` when `database.url` is set, otherwise
//!    an in-memory store seeded with one player per session
//! 4. Build the exploration service and shared state
//! 5. Serve until `Ctrl-C`, then close the database pool

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use xiuxian_core::config::AppConfig;
use xiuxian_core::{ExplorationService, ExplorationStore, MemoryStore};
use xiuxian_db::{PgStore, PostgresConfig, PostgresPool};
use xiuxian_server::{AppState, ServerConfig, start_server};
use xiuxian_types::Player;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let config = AppConfig::load().context("loading configuration")?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        host = config.server.host,
        port = config.server.port,
        default_duration_ms = config.exploration.default_duration_ms,
        max_duration_ms = config.exploration.max_duration_ms,
        sessions = config.sessions.len(),
        "xiuxian-server starting"
    );

    // 3. Open the store.
    if config.database.is_enabled() {
        let pool = PostgresPool::connect(&PostgresConfig::from(&config.database))
            .await
            .context("connecting to PostgreSQL")?;
        pool.run_migrations()
            .await
            .context("running migrations")?;
        let store = Arc::new(PgStore::new(pool));
        serve(&config, Arc::clone(&store)).await?;
        store.pool().close().await;
        Ok(())
    } else {
        warn!("database.url is empty; using the in-memory store");
        let store = MemoryStore::new();
        for user_id in config.session_table().into_values() {
            store.insert_player(Player::new(user_id)).await;
        }
        serve(&config, Arc::new(store)).await
    }
}

/// Steps 4 and 5.
async fn serve<S: ExplorationStore + 'static>(config: &AppConfig, store: Arc<S>) -> anyhow::Result<()> {
    let service = ExplorationService::new(store, config.exploration.clone());
    let state = Arc::new(AppState::new(service).with_sessions(config.session_table()));
    info!("Exploration service ready");

    start_server(&ServerConfig::from(&config.server), state)
        .await
        .context("running the player API")
}
