// Port Layer - Interfaces for external dependencies

pub mod id_provider; // For deterministic testing
pub mod kv_store;
pub mod maintenance;
pub mod time_provider;

// Re-exports
pub use id_provider::IdProvider;
pub use kv_store::{InMemoryKvStore, KvStore, PutOptions};
pub use maintenance::{Maintenance, MaintenanceConfig, MaintenanceStats};
pub use time_provider::TimeProvider;
