// Todo Domain Model

use serde::{Deserialize, Serialize};

/// List identifier (also the storage key of the list)
pub type ListId = String;

/// Todo ID (UUID v4)
pub type TodoId = String;

/// A single task inside a list.
///
/// Stored as one element of the JSON array kept under the list's key, so the
/// field names follow the stored format (`createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_at: i64, // epoch ms
}

impl Todo {
    /// Create a new, not yet completed todo
    ///
    /// # Arguments
    ///
    /// * `id` - Unique todo ID (injected, not generated)
    /// * `text` - Task description
    /// * `created_at` - Creation timestamp in epoch ms (injected, not system time)
    pub fn new(id: impl Into<String>, text: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            created_at,
        }
    }

    /// Flip the completion flag
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_todo_is_open() {
        let todo = Todo::new("t-1", "buy milk", 1000);
        assert!(!todo.completed);
        assert_eq!(todo.created_at, 1000);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut todo = Todo::new("t-1", "buy milk", 1000);
        todo.toggle();
        assert!(todo.completed);
        todo.toggle();
        assert!(!todo.completed);
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let todo = Todo::new("t-1", "buy milk", 42);
        let value = serde_json::to_value(&todo).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "t-1",
                "text": "buy milk",
                "completed": false,
                "createdAt": 42
            })
        );
    }

    #[test]
    fn test_deserializes_entries_without_timestamp() {
        let todo: Todo =
            serde_json::from_str(r#"{"id":"a","text":"legacy","completed":true}"#).unwrap();
        assert!(todo.completed);
        assert_eq!(todo.created_at, 0);
    }
}
