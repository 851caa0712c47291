//! Todo Core Library
//!
//! This crate provides the domain model, error types and repository trait for
//! the todo service. All other crates depend on the types defined here.
//!
//! # Architecture
//!
//! - [`models`] - Core domain models (`TodoItem`, `TodoPatch`)
//! - [`error`] - Error types and result handling
//! - [`repository`] - Repository trait for data persistence
//!
//! # Example
//!
//! ```rust
//! use todo_core::models::TodoPatch;
//!
//! // Request bodies deserialize through the field whitelist: unknown keys
//! // are dropped, null values count as "not supplied".
//! let patch: TodoPatch = serde_json::from_str(r#"{"completed":true,"foo":1}"#).unwrap();
//! assert_eq!(patch.completed, Some(true));
//! assert!(!patch.is_empty());
//! ```

pub mod error;
pub mod models;
pub mod repository;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, TodoError};
pub use models::{TodoItem, TodoPatch};
pub use repository::TodoRepository;
