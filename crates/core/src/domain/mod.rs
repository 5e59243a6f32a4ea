// Domain Layer - Pure business logic and entities

pub mod error;
pub mod intent;
pub mod todo;

// Re-exports
pub use error::DomainError;
pub use intent::Intent;
pub use todo::{ListId, Todo, TodoId};
