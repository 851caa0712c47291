//! Mock implementation of the TodoRepository trait
//!
//! Provides a thread-safe mock repository with:
//! - Error injection capabilities
//! - Call tracking for verification

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use todo_core::{Result, TodoError, TodoItem, TodoPatch, TodoRepository};

/// Mock implementation of TodoRepository for testing
///
/// Backed by a `BTreeMap` so listing is ordered by id, matching the real
/// repository's `ORDER BY id`.
pub struct MockTodoRepository {
    todos: Arc<Mutex<BTreeMap<i64, TodoItem>>>,
    error_injection: Arc<Mutex<Option<TodoError>>>,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl Default for MockTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTodoRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            todos: Arc::new(Mutex::new(BTreeMap::new())),
            error_injection: Arc::new(Mutex::new(None)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock repository with pre-populated items
    pub fn with_todos(todos: Vec<TodoItem>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.todos.lock();
            for todo in todos {
                map.insert(todo.id, todo);
            }
        }
        repo
    }

    /// Inject an error returned by every subsequent operation until cleared
    pub fn inject_error(&self, error: TodoError) {
        *self.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.error_injection.lock() = None;
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().clone()
    }

    /// Assert a method was called
    pub fn assert_called(&self, method: &str) {
        assert!(
            self.call_history.lock().iter().any(|m| m == method),
            "Expected method '{method}' to have been called"
        );
    }

    /// Assert a method was never called
    pub fn assert_not_called(&self, method: &str) {
        assert!(
            !self.call_history.lock().iter().any(|m| m == method),
            "Expected method '{method}' to never be called"
        );
    }

    fn record_call(&self, method: &str) -> Result<()> {
        self.call_history.lock().push(method.to_string());
        match self.error_injection.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn list_all(&self) -> Result<Vec<TodoItem>> {
        self.record_call("list_all")?;
        Ok(self.todos.lock().values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<TodoItem>> {
        self.record_call("get_by_id")?;
        Ok(self.todos.lock().get(&id).cloned())
    }

    async fn insert(&self, id: i64, fields: TodoPatch) -> Result<()> {
        self.record_call("insert")?;
        let mut todos = self.todos.lock();
        if todos.contains_key(&id) {
            return Err(TodoError::DuplicateId(id));
        }
        todos.insert(
            id,
            TodoItem {
                id,
                text: fields.text,
                due_date: fields.due_date,
                completed: fields.completed.unwrap_or(false),
            },
        );
        Ok(())
    }

    async fn update(&self, id: i64, fields: TodoPatch) -> Result<()> {
        self.record_call("update")?;
        if fields.is_empty() {
            return Err(TodoError::no_valid_fields());
        }
        let mut todos = self.todos.lock();
        let Some(mut todo) = todos.remove(&id) else {
            return Err(TodoError::not_found_id(id));
        };
        if let Some(new_id) = fields.id {
            todo.id = new_id;
        }
        if let Some(text) = fields.text {
            todo.text = Some(text);
        }
        if let Some(due_date) = fields.due_date {
            todo.due_date = Some(due_date);
        }
        if let Some(completed) = fields.completed {
            todo.completed = completed;
        }
        todos.insert(todo.id, todo);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.record_call("delete")?;
        match self.todos.lock().remove(&id) {
            Some(_) => Ok(()),
            None => Err(TodoError::not_found_id(id)),
        }
    }

    async fn health_check(&self) -> Result<()> {
        self.record_call("health_check")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, text: &str) -> TodoItem {
        TodoItem {
            id,
            text: Some(text.to_string()),
            due_date: None,
            completed: false,
        }
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = MockTodoRepository::with_todos(vec![item(3, "c"), item(1, "a"), item(2, "b")]);
        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_error_injection() {
        let repo = MockTodoRepository::new();
        repo.inject_error(TodoError::Database("write failed".to_string()));

        let result = repo.insert(1, TodoPatch::default()).await;
        assert!(result.unwrap_err().is_database());

        repo.clear_error();
        assert!(repo.insert(1, TodoPatch::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_call_tracking() {
        let repo = MockTodoRepository::new();
        let _ = repo.list_all().await;
        let _ = repo.delete(1).await;

        repo.assert_called("list_all");
        repo.assert_called("delete");
        repo.assert_not_called("insert");
    }

    #[tokio::test]
    async fn test_update_mirrors_real_semantics() {
        let repo = MockTodoRepository::with_todos(vec![item(1, "old")]);

        assert!(repo.update(1, TodoPatch::default()).await.unwrap_err().is_validation());
        assert!(repo
            .update(999, TodoPatch { completed: Some(true), ..Default::default() })
            .await
            .unwrap_err()
            .is_not_found());

        repo.update(1, TodoPatch { completed: Some(true), ..Default::default() })
            .await
            .unwrap();
        let todo = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(todo.text.as_deref(), Some("old"));
        assert!(todo.completed);
    }
}
