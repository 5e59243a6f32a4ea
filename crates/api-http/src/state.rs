//! Shared handler state (dependency injection)

use std::sync::Arc;
use std::time::Duration;
use todo_core::application::TodoManager;
use todo_core::error::Result;
use todo_core::port::{IdProvider, KvStore, TimeProvider};

/// Handler state with injected dependencies
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn KvStore>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    list_ttl: Option<Duration>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn KvStore>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            store,
            id_provider,
            time_provider,
            list_ttl: None,
        }
    }

    /// Expire lists this long after their last write
    pub fn with_list_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.list_ttl = ttl;
        self
    }

    /// Data manager for one list (built per request)
    pub fn manager(&self, list_id: &str) -> Result<TodoManager> {
        Ok(TodoManager::new(
            Arc::clone(&self.store),
            list_id,
            Arc::clone(&self.id_provider),
            Arc::clone(&self.time_provider),
        )?
        .with_expiration(self.list_ttl))
    }

    /// Fresh identifier for a brand new list
    pub fn new_list_id(&self) -> String {
        self.id_provider.generate_id()
    }
}
