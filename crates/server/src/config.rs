//! Server configuration
//!
//! Layered: built-in defaults, then an optional TOML file named by
//! `TODO_CONFIG`, then `TODO_*` environment variables.

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_PATH_ENV: &str = "TODO_CONFIG";
const ENV_PREFIX: &str = "TODO";
const DEFAULT_DB_PATH: &str = "~/.todo/lists.db";
/// 100 years
const MAX_LIST_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageKind,
    pub db_path: String,
    /// Lists expire this many seconds after their last write
    #[serde(default)]
    pub list_ttl_secs: Option<u64>,
    pub maintenance_interval_secs: u64,
    pub max_db_size_mb: f64,
    pub log_format: LogFormat,
    #[serde(default)]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        let file = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load_from(file.as_deref().map(Path::new), None)
    }

    /// Load from an optional file, with `env` replacing the process
    /// environment when given
    pub fn load_from(file: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8787)?
            .set_default("storage", "sqlite")?
            .set_default("db_path", DEFAULT_DB_PATH)?
            .set_default("maintenance_interval_secs", 3600)?
            .set_default("max_db_size_mb", 100.0)?
            .set_default("log_format", "pretty")?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .context("Failed to read configuration")?;

        let mut config: ServerConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.db_path = shellexpand::tilde(&config.db_path).into_owned();

        if config.maintenance_interval_secs == 0 {
            anyhow::bail!("maintenance_interval_secs must be greater than zero");
        }
        match config.list_ttl_secs {
            Some(0) => anyhow::bail!("list_ttl_secs must be greater than zero"),
            Some(ttl) if ttl > MAX_LIST_TTL_SECS => {
                anyhow::bail!("list_ttl_secs must be at most {}", MAX_LIST_TTL_SECS)
            }
            _ => {}
        }

        Ok(config)
    }

    pub fn list_ttl(&self) -> Option<Duration> {
        self.list_ttl_secs.map(Duration::from_secs)
    }

    pub fn maintenance_interval(&self) -> Duration {
        Duration::from_secs(self.maintenance_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::load_from(None, env(&[])).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8787);
        assert_eq!(config.storage, StorageKind::Sqlite);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.db_path.ends_with(".todo/lists.db"));
        assert!(!config.db_path.starts_with('~'));
        assert_eq!(config.list_ttl(), None);
        assert_eq!(config.maintenance_interval(), Duration::from_secs(3600));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn test_env_overrides() {
        let config = ServerConfig::load_from(
            None,
            env(&[
                ("TODO_PORT", "9000"),
                ("TODO_STORAGE", "memory"),
                ("TODO_LIST_TTL_SECS", "604800"),
                ("TODO_LOG_FORMAT", "json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.list_ttl(), Some(Duration::from_secs(604_800)));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_file_then_env() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "host = \"0.0.0.0\"\nport = 7000\ndb_path = \"/tmp/lists.db\"\nmax_db_size_mb = 250.5"
        )
        .unwrap();

        let config =
            ServerConfig::load_from(Some(file.path()), env(&[("TODO_PORT", "7001")])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 7001);
        assert_eq!(config.db_path, "/tmp/lists.db");
        assert_eq!(config.max_db_size_mb, 250.5);
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = ServerConfig::load_from(Some(Path::new("/nonexistent/todo.toml")), env(&[]));
        tokio_test::assert_err!(result);
    }

    #[test]
    fn test_invalid_values_rejected() {
        tokio_test::assert_err!(ServerConfig::load_from(
            None,
            env(&[("TODO_STORAGE", "redis")])
        ));
        tokio_test::assert_err!(ServerConfig::load_from(
            None,
            env(&[("TODO_MAINTENANCE_INTERVAL_SECS", "0")])
        ));
        tokio_test::assert_err!(ServerConfig::load_from(
            None,
            env(&[("TODO_LIST_TTL_SECS", "0")])
        ));
        tokio_test::assert_err!(ServerConfig::load_from(
            None,
            env(&[("TODO_LIST_TTL_SECS", "4000000000")])
        ));
    }
}
