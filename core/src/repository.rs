use crate::{
    error::Result,
    models::{TodoItem, TodoPatch},
};
use async_trait::async_trait;

/// Repository trait for todo persistence and retrieval operations.
///
/// Implementations must be thread-safe and support concurrent access; all
/// mutating operations commit immediately as single statements.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// List all todos, ordered by id ascending
    ///
    /// # Returns
    /// * `Ok(Vec<TodoItem>)` - All stored items (may be empty)
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn list_all(&self) -> Result<Vec<TodoItem>>;

    /// Get a todo by its id
    ///
    /// # Returns
    /// * `Ok(Some(TodoItem))` - The item if found
    /// * `Ok(None)` - If no item exists with that id
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn get_by_id(&self, id: i64) -> Result<Option<TodoItem>>;

    /// Insert a new todo with a caller-supplied id
    ///
    /// Missing `text`/`due_date` are stored as NULL; a missing `completed`
    /// defaults to `false`. The `id` field of the patch is ignored, the path
    /// id wins.
    ///
    /// # Returns
    /// * `Ok(())` - The item was stored
    /// * `Err(TodoError::DuplicateId)` - If the id already exists
    /// * `Err(TodoError::Database)` - If the write fails
    async fn insert(&self, id: i64, fields: TodoPatch) -> Result<()>;

    /// Update an existing todo in place
    ///
    /// Only the fields present in the patch change; success means at least
    /// one row was affected. An empty patch must never reach the database.
    ///
    /// # Returns
    /// * `Ok(())` - At least one row was updated
    /// * `Err(TodoError::Validation)` - If the patch has no fields
    /// * `Err(TodoError::NotFound)` - If the id does not exist
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn update(&self, id: i64, fields: TodoPatch) -> Result<()>;

    /// Delete a todo by id
    ///
    /// # Returns
    /// * `Ok(())` - A row existed and was removed
    /// * `Err(TodoError::NotFound)` - If the id does not exist
    /// * `Err(TodoError::Database)` - If the database operation fails
    async fn delete(&self, id: i64) -> Result<()>;

    /// Get repository health status for monitoring
    ///
    /// # Returns
    /// * `Ok(())` - Repository is healthy and connected
    /// * `Err(TodoError::Database)` - Repository is unhealthy
    async fn health_check(&self) -> Result<()>;
}
