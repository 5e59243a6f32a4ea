// Todo Infrastructure - SQLite Adapter
// Implements: KvStore, Maintenance

mod connection;
mod error;
mod kv_store;
mod maintenance_impl;
mod migration;

pub use connection::create_pool;
pub use kv_store::SqliteKvStore;
pub use maintenance_impl::SqliteMaintenance;
pub use migration::{current_version, run_migrations};
