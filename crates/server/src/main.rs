//! Todo Lists Server - Main Entry Point

mod config;
mod logging;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::{ServerConfig, StorageKind};
use todo_api_http::{AppState, HttpServer, HttpServerConfig};
use todo_core::application::{shutdown_channel, MaintenanceScheduler};
use todo_core::port::id_provider::UuidProvider;
use todo_core::port::time_provider::SystemTimeProvider;
use todo_core::port::{InMemoryKvStore, KvStore, MaintenanceConfig, TimeProvider};
use todo_infra_sqlite::{create_pool, run_migrations, SqliteKvStore, SqliteMaintenance};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = ServerConfig::load()?;

    // 2. Initialize logging (guard flushes the log file on exit)
    let _log_guard = logging::init(config.log_format, config.log_dir.as_deref())?;

    info!(version = VERSION, "Todo server starting...");

    // 3. Storage + DI wiring
    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);
    let (shutdown_tx, _shutdown_rx) = shutdown_channel();

    let (store, maintenance_handle) = match config.storage {
        StorageKind::Memory => {
            warn!("Using in-memory storage, lists are lost on restart");
            let store: Arc<dyn KvStore> = Arc::new(InMemoryKvStore::new(time_provider.clone()));
            (store, None)
        }
        StorageKind::Sqlite => {
            info!(db_path = %config.db_path, "Initializing database...");
            if let Some(parent) = Path::new(&config.db_path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }

            let pool = create_pool(&config.db_path)
                .await
                .map_err(|e| anyhow::anyhow!("DB pool creation failed: {}", e))?;
            run_migrations(&pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;

            // Purge expired lists and compact the DB in the background
            let maintenance = Arc::new(SqliteMaintenance::new(pool.clone(), time_provider.clone()));
            let scheduler = MaintenanceScheduler::new(
                maintenance,
                MaintenanceConfig {
                    max_db_size_mb: config.max_db_size_mb,
                },
                config.maintenance_interval(),
            );
            let handle = tokio::spawn(scheduler.run(shutdown_tx.subscribe()));

            let store: Arc<dyn KvStore> = Arc::new(SqliteKvStore::new(pool, time_provider.clone()));
            (store, Some(handle))
        }
    };

    let state = AppState::new(store, id_provider, time_provider).with_list_ttl(config.list_ttl());

    // 4. Start HTTP server
    let http_config = HttpServerConfig {
        host: config.host.clone(),
        port: config.port,
    };
    let http_handle = HttpServer::new(http_config, state)
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server start failed: {}", e))?;

    info!(
        address = %http_handle.local_addr(),
        list_ttl_secs = ?config.list_ttl_secs,
        "System ready. Press Ctrl+C to shutdown"
    );

    // 5. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 6. Graceful shutdown
    shutdown_tx.shutdown();
    http_handle
        .stop()
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server stop failed: {}", e))?;
    if let Some(handle) = maintenance_handle {
        if tokio::time::timeout(SHUTDOWN_GRACE, handle).await.is_err() {
            warn!("Maintenance scheduler did not stop in time");
        }
    }

    info!("Shutdown complete.");

    Ok(())
}
