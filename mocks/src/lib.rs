//! Mock implementations and test utilities for the todo service
//!
//! This crate provides an in-memory `TodoRepository` with error injection
//! and call tracking, used by the HTTP layer's tests to verify status-code
//! mapping and to prove that invalid requests never reach storage.

pub mod repository;

pub use repository::MockTodoRepository;
