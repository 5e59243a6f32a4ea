// SQLite Maintenance Implementation
use crate::error::map_sqlx_error;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use todo_core::error::Result;
use todo_core::port::{Maintenance, MaintenanceStats, TimeProvider};
use tracing::info;

/// SQLite maintenance implementation
pub struct SqliteMaintenance {
    pool: SqlitePool,
    time_provider: Arc<dyn TimeProvider>,
}

impl SqliteMaintenance {
    pub fn new(pool: SqlitePool, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            pool,
            time_provider,
        }
    }

    /// Get DB size in bytes
    async fn get_db_size_bytes(&self) -> Result<i64> {
        let page_count: i64 = sqlx::query_scalar("PRAGMA page_count")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let page_size: i64 = sqlx::query_scalar("PRAGMA page_size")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(page_count * page_size)
    }
}

fn bytes_to_mb(bytes: i64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

#[async_trait]
impl Maintenance for SqliteMaintenance {
    async fn vacuum(&self) -> Result<f64> {
        info!("Running VACUUM to optimize database...");

        let size_before = bytes_to_mb(self.get_db_size_bytes().await?);

        sqlx::query("VACUUM")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let size_after = bytes_to_mb(self.get_db_size_bytes().await?);
        let reclaimed = (size_before - size_after).max(0.0);

        info!(
            size_before_mb = size_before,
            size_after_mb = size_after,
            reclaimed_mb = reclaimed,
            "VACUUM completed"
        );

        Ok(reclaimed)
    }

    async fn purge_expired(&self) -> Result<u64> {
        let now = self.time_provider.now_millis();

        let result = sqlx::query(
            r#"
            DELETE FROM kv_entries
            WHERE expires_at IS NOT NULL
              AND expires_at <= ?
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let deleted = result.rows_affected();
        if deleted > 0 {
            info!(deleted_keys = deleted, "Expired entries purged");
        }

        Ok(deleted)
    }

    async fn get_stats(&self) -> Result<MaintenanceStats> {
        let now = self.time_provider.now_millis();
        let db_size_bytes = self.get_db_size_bytes().await?;

        let key_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_entries")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        let expired_key_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM kv_entries WHERE expires_at IS NOT NULL AND expires_at <= ?",
        )
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(MaintenanceStats {
            db_size_mb: bytes_to_mb(db_size_bytes),
            db_size_bytes,
            key_count,
            expired_key_count,
        })
    }
}
