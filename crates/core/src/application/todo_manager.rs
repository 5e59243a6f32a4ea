// Todo Manager - list/create/toggle/delete over one stored JSON array

use crate::domain::{DomainError, Intent, ListId, Todo};
use crate::error::Result;
use crate::port::{IdProvider, KvStore, PutOptions, TimeProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Result of applying an [`Intent`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Created(Todo),
    /// None when no todo had the requested id
    Toggled(Option<Todo>),
    /// Whether a todo was removed
    Deleted(bool),
}

/// Data manager for a single list.
///
/// The whole list lives under one key as a JSON array; every mutation
/// reads the array, changes it and writes it back.
pub struct TodoManager {
    store: Arc<dyn KvStore>,
    list_id: ListId,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    put_options: PutOptions,
}

impl TodoManager {
    pub fn new(
        store: Arc<dyn KvStore>,
        list_id: impl Into<ListId>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Result<Self> {
        let list_id = list_id.into();
        if list_id.is_empty() {
            return Err(DomainError::InvalidListId.into());
        }

        Ok(Self {
            store,
            list_id,
            id_provider,
            time_provider,
            put_options: PutOptions::default(),
        })
    }

    /// Apply an expiration TTL to every write of this list
    pub fn with_expiration(mut self, ttl: Option<Duration>) -> Self {
        self.put_options.expiration_ttl = ttl;
        self
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    /// All todos of the list, newest first
    pub async fn list(&self) -> Result<Vec<Todo>> {
        let mut todos = self.load().await?;
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(todos)
    }

    /// Append a new open todo
    pub async fn create(&self, text: &str) -> Result<Todo> {
        if text.is_empty() {
            return Err(DomainError::InvalidText.into());
        }

        let todo = Todo::new(
            self.id_provider.generate_id(),
            text,
            self.time_provider.now_millis(),
        );

        let mut todos = self.load().await?;
        todos.push(todo.clone());
        self.save(&todos).await?;

        debug!(list_id = %self.list_id, todo_id = %todo.id, "Todo created");
        Ok(todo)
    }

    /// Flip the completion flag of `id` (nothing is written if absent)
    pub async fn toggle(&self, id: &str) -> Result<Option<Todo>> {
        let mut todos = self.load().await?;

        let toggled = match todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.toggle();
                todo.clone()
            }
            None => {
                debug!(list_id = %self.list_id, todo_id = %id, "Toggle of unknown todo ignored");
                return Ok(None);
            }
        };

        self.save(&todos).await?;
        Ok(Some(toggled))
    }

    /// Remove `id` from the list; the remaining array is always written back
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut todos = self.load().await?;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        let removed = todos.len() != before;

        self.save(&todos).await?;
        Ok(removed)
    }

    /// Dispatch a parsed form submission
    pub async fn apply(&self, intent: Intent) -> Result<IntentOutcome> {
        match intent {
            Intent::Create { text } => self.create(&text).await.map(IntentOutcome::Created),
            Intent::Toggle { id } => self.toggle(&id).await.map(IntentOutcome::Toggled),
            Intent::Delete { id } => self.delete(&id).await.map(IntentOutcome::Deleted),
        }
    }

    async fn load(&self) -> Result<Vec<Todo>> {
        let Some(raw) = self.store.get(&self.list_id).await? else {
            return Ok(Vec::new());
        };

        let value: serde_json::Value = serde_json::from_str(&raw)?;
        if !value.is_array() {
            warn!(list_id = %self.list_id, "Stored list is not a JSON array, treating as empty");
            return Ok(Vec::new());
        }

        Ok(serde_json::from_value(value)?)
    }

    async fn save(&self, todos: &[Todo]) -> Result<()> {
        let raw = serde_json::to_string(todos)?;
        self.store.put(&self.list_id, &raw, self.put_options).await
    }
}
