// Storage Maintenance port
use crate::error::Result;
use async_trait::async_trait;

/// Storage maintenance statistics
#[derive(Debug, Clone, Default)]
pub struct MaintenanceStats {
    pub db_size_mb: f64,
    pub db_size_bytes: i64,
    pub key_count: i64,
    pub expired_key_count: i64,
}

/// Maintenance configuration
#[derive(Debug, Clone)]
pub struct MaintenanceConfig {
    /// DB size above which VACUUM runs (MB)
    pub max_db_size_mb: f64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            max_db_size_mb: 100.0,
        }
    }
}

/// Storage maintenance operations
#[async_trait]
pub trait Maintenance: Send + Sync {
    /// Run VACUUM to reclaim space
    ///
    /// # Returns
    /// Space reclaimed in MB
    async fn vacuum(&self) -> Result<f64>;

    /// Delete entries whose expiration time has passed
    ///
    /// # Returns
    /// Number of entries deleted
    async fn purge_expired(&self) -> Result<u64>;

    /// Get maintenance statistics
    async fn get_stats(&self) -> Result<MaintenanceStats>;

    /// Run full maintenance (purge + VACUUM when the DB is large)
    async fn run_full_maintenance(&self, config: &MaintenanceConfig) -> Result<MaintenanceStats> {
        let purged = self.purge_expired().await?;

        let stats_before = self.get_stats().await?;
        let reclaimed_mb = if stats_before.db_size_mb > config.max_db_size_mb {
            self.vacuum().await?
        } else {
            0.0
        };

        let stats_after = self.get_stats().await?;

        tracing::info!(
            purged_keys = purged,
            reclaimed_mb = reclaimed_mb,
            db_size_mb = stats_after.db_size_mb,
            key_count = stats_after.key_count,
            "Maintenance completed"
        );

        Ok(stats_after)
    }
}
