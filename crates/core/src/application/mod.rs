// Application Layer - Use Cases and Business Logic

pub mod maintenance;
pub mod shutdown;
pub mod todo_manager;

// Re-exports
pub use maintenance::MaintenanceScheduler;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
pub use todo_manager::{IntentOutcome, TodoManager};
