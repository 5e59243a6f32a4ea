// Maintenance Service
// Scheduled purge of expired lists and DB compaction

use crate::application::shutdown::ShutdownToken;
use crate::error::Result;
use crate::port::{Maintenance, MaintenanceConfig, MaintenanceStats};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

/// Maintenance scheduler
///
/// Runs periodic maintenance operations (purge expired, VACUUM) in the background
pub struct MaintenanceScheduler {
    maintenance: Arc<dyn Maintenance>,
    config: MaintenanceConfig,
    interval: Duration,
}

impl MaintenanceScheduler {
    /// Create a new maintenance scheduler
    ///
    /// # Arguments
    /// * `maintenance` - Maintenance implementation
    /// * `config` - Maintenance configuration
    /// * `interval` - How often to run maintenance
    pub fn new(
        maintenance: Arc<dyn Maintenance>,
        config: MaintenanceConfig,
        interval: Duration,
    ) -> Self {
        Self {
            maintenance,
            config,
            interval,
        }
    }

    /// Run maintenance loop until `shutdown` fires
    ///
    /// Should be spawned in tokio::spawn
    pub async fn run(self, mut shutdown: ShutdownToken) {
        info!(
            interval_secs = self.interval.as_secs(),
            max_db_size_mb = self.config.max_db_size_mb,
            "Maintenance scheduler started"
        );

        let mut tick = interval(self.interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately, skip it so startup stays fast
        tick.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.wait() => {
                    info!("Maintenance scheduler stopped");
                    return;
                }
                _ = tick.tick() => {
                    match self.maintenance.run_full_maintenance(&self.config).await {
                        Ok(stats) => {
                            info!(
                                db_size_mb = stats.db_size_mb,
                                key_count = stats.key_count,
                                "Scheduled maintenance completed successfully"
                            );
                        }
                        Err(e) => {
                            error!(error = ?e, "Scheduled maintenance failed");
                        }
                    }
                }
            }
        }
    }

    /// Run maintenance immediately (for manual trigger)
    pub async fn run_now(&self) -> Result<MaintenanceStats> {
        info!("Running manual maintenance...");

        let stats = self.maintenance.run_full_maintenance(&self.config).await?;

        info!(
            db_size_mb = stats.db_size_mb,
            key_count = stats.key_count,
            "Manual maintenance completed"
        );

        Ok(stats)
    }
}
