//! Database crate for the todo service
//!
//! This crate provides the SQLite implementation of the `TodoRepository`
//! trait, with connection pooling, positional parameter binding, and error
//! mapping from sqlx failures to the service's typed errors.
//!
//! # Usage
//!
//! ```rust
//! use database::SqliteTodoRepository;
//! use todo_core::repository::TodoRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // In-memory database for testing
//!     let repo = SqliteTodoRepository::new(":memory:").await?;
//!
//!     // Idempotently ensure the todos table exists
//!     repo.ensure_table().await?;
//!
//!     repo.health_check().await?;
//!     Ok(())
//! }
//! ```

mod common;
mod sqlite;

pub use sqlite::SqliteTodoRepository;

// Re-export commonly used types from todo-core for convenience
pub use todo_core::{
    error::{Result, TodoError},
    models::{TodoItem, TodoPatch},
    repository::TodoRepository,
};
