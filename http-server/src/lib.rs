//! HTTP server crate for the todo service
//!
//! Exposes the CRUD routes over the `TodoRepository`, along with the
//! configuration, telemetry and startup plumbing used by the binary.

pub mod config;
pub mod routes;
pub mod setup;
pub mod telemetry;

pub use routes::{router, AppState};
