use crate::common::{row_to_todo, sqlx_error_to_todo_error};
use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use todo_core::{
    error::{Result, TodoError},
    models::{TodoItem, TodoPatch},
    repository::TodoRepository,
};

/// SQLite implementation of the TodoRepository trait
///
/// Provides todo persistence over a sqlx connection pool with positional
/// parameter binding for all caller-controlled values. Field names in
/// generated SQL come only from the fixed whitelist.
#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
    pool: SqlitePool,
}

impl SqliteTodoRepository {
    /// Create a new SQLite repository with the given database URL
    ///
    /// # Arguments
    /// * `database_url` - SQLite database URL (file path or `:memory:`)
    ///
    /// # Returns
    /// * `Ok(SqliteTodoRepository)` - Successfully connected repository
    /// * `Err(TodoError::Database)` - If connection fails
    ///
    /// # Examples
    /// ```rust,no_run
    /// use database::SqliteTodoRepository;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// // In-memory database for testing
    /// let repo = SqliteTodoRepository::new(":memory:").await?;
    ///
    /// // File-based database
    /// let repo = SqliteTodoRepository::new("sqlite:///tmp/todos.sqlite").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::with_max_connections(database_url, 5).await
    }

    /// Create a new repository with an explicit pool size
    pub async fn with_max_connections(database_url: &str, max_connections: u32) -> Result<Self> {
        let in_memory = database_url.contains(":memory:");

        let connect_options = if in_memory {
            sqlx::sqlite::SqliteConnectOptions::new()
                .filename(database_url)
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Memory)
                .busy_timeout(std::time::Duration::from_secs(5))
        } else {
            sqlx::sqlite::SqliteConnectOptions::new()
                .filename(database_url.trim_start_matches("sqlite://"))
                .create_if_missing(true)
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .busy_timeout(std::time::Duration::from_secs(5))
        };

        // An in-memory database exists per connection, so the pool is pinned
        // to a single connection that is never reclaimed.
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| sqlx_error_to_todo_error(e, None))?;

        tracing::info!(database_url, "Connected to SQLite database");

        Ok(Self { pool })
    }

    /// Idempotently ensure the todos table exists
    ///
    /// Safe to invoke repeatedly; runs once per process start before the
    /// first request is served.
    pub async fn ensure_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY,
                text TEXT,
                "dueDate" TEXT,
                completed BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| sqlx_error_to_todo_error(e, None))?;

        tracing::info!("Ensured todos table exists");
        Ok(())
    }

    /// Get access to the underlying database pool for custom operations
    ///
    /// This method is primarily intended for testing scenarios where
    /// direct SQL execution is needed.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn list_all(&self) -> Result<Vec<TodoItem>> {
        let rows = sqlx::query(r#"SELECT id, text, "dueDate", completed FROM todos ORDER BY id"#)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| sqlx_error_to_todo_error(e, None))?;

        rows.iter().map(row_to_todo).collect()
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<TodoItem>> {
        let result =
            sqlx::query(r#"SELECT id, text, "dueDate", completed FROM todos WHERE id = ?"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| sqlx_error_to_todo_error(e, Some(id)))?;

        match result {
            Some(row) => Ok(Some(row_to_todo(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, id: i64, fields: TodoPatch) -> Result<()> {
        sqlx::query(r#"INSERT INTO todos (id, text, "dueDate", completed) VALUES (?, ?, ?, ?)"#)
            .bind(id)
            .bind(&fields.text)
            .bind(&fields.due_date)
            .bind(fields.completed.unwrap_or(false))
            .execute(&self.pool)
            .await
            .map_err(|e| sqlx_error_to_todo_error(e, Some(id)))?;

        tracing::debug!(id, "Inserted todo");
        Ok(())
    }

    async fn update(&self, id: i64, fields: TodoPatch) -> Result<()> {
        // The route layer rejects empty patches first; an empty patch here
        // must still never reach the database.
        if fields.is_empty() {
            return Err(TodoError::no_valid_fields());
        }

        // Build the SET clause from exactly the whitelisted fields present.
        // Column names are fixed literals; values are bound positionally.
        let mut query_builder: sqlx::QueryBuilder<sqlx::Sqlite> =
            sqlx::QueryBuilder::new("UPDATE todos SET ");

        let mut has_updates = false;

        if let Some(new_id) = fields.id {
            query_builder.push("id = ");
            query_builder.push_bind(new_id);
            has_updates = true;
        }

        if let Some(text) = &fields.text {
            if has_updates {
                query_builder.push(", ");
            }
            query_builder.push("text = ");
            query_builder.push_bind(text);
            has_updates = true;
        }

        if let Some(due_date) = &fields.due_date {
            if has_updates {
                query_builder.push(", ");
            }
            query_builder.push("\"dueDate\" = ");
            query_builder.push_bind(due_date);
            has_updates = true;
        }

        if let Some(completed) = fields.completed {
            if has_updates {
                query_builder.push(", ");
            }
            query_builder.push("completed = ");
            query_builder.push_bind(completed);
        }

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(id);

        let result = query_builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| sqlx_error_to_todo_error(e, Some(id)))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::not_found_id(id));
        }

        tracing::debug!(id, "Updated todo");
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| sqlx_error_to_todo_error(e, Some(id)))?;

        if result.rows_affected() == 0 {
            return Err(TodoError::not_found_id(id));
        }

        tracing::debug!(id, "Deleted todo");
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| sqlx_error_to_todo_error(e, None))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_repository() -> SqliteTodoRepository {
        let repo = SqliteTodoRepository::new(":memory:").await.unwrap();
        repo.ensure_table().await.unwrap();
        repo
    }

    fn patch(
        text: Option<&str>,
        due_date: Option<&str>,
        completed: Option<bool>,
    ) -> TodoPatch {
        TodoPatch {
            id: None,
            text: text.map(str::to_string),
            due_date: due_date.map(str::to_string),
            completed,
        }
    }

    #[tokio::test]
    async fn test_repository_creation() {
        let repo = create_test_repository().await;
        assert!(repo.health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_ensure_table_is_idempotent() {
        let repo = create_test_repository().await;
        repo.ensure_table().await.unwrap();
        repo.ensure_table().await.unwrap();

        repo.insert(1, patch(Some("a"), None, None)).await.unwrap();
        repo.ensure_table().await.unwrap();

        // Existing rows survive a repeated initialization
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_and_list_ordered() {
        let repo = create_test_repository().await;

        repo.insert(3, patch(Some("three"), None, None)).await.unwrap();
        repo.insert(1, patch(Some("one"), None, None)).await.unwrap();
        repo.insert(2, patch(Some("two"), None, None)).await.unwrap();

        let todos = repo.list_all().await.unwrap();
        let ids: Vec<i64> = todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_insert_defaults() {
        let repo = create_test_repository().await;

        repo.insert(1, TodoPatch::default()).await.unwrap();

        let todo = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(todo.id, 1);
        assert!(todo.text.is_none());
        assert!(todo.due_date.is_none());
        assert!(!todo.completed);
    }

    #[tokio::test]
    async fn test_duplicate_insert_fails() {
        let repo = create_test_repository().await;

        repo.insert(5, patch(Some("first"), None, None)).await.unwrap();

        let result = repo.insert(5, patch(Some("second"), None, None)).await;
        match result.unwrap_err() {
            TodoError::DuplicateId(5) => {}
            other => panic!("Expected DuplicateId error, got: {other:?}"),
        }

        // The first row is untouched
        let todo = repo.get_by_id(5).await.unwrap().unwrap();
        assert_eq!(todo.text.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_partial_update_preserves_other_fields() {
        let repo = create_test_repository().await;

        repo.insert(3, patch(Some("old"), Some("d"), Some(false)))
            .await
            .unwrap();

        repo.update(3, patch(None, None, Some(true))).await.unwrap();

        let todo = repo.get_by_id(3).await.unwrap().unwrap();
        assert_eq!(todo.text.as_deref(), Some("old"));
        assert_eq!(todo.due_date.as_deref(), Some("d"));
        assert!(todo.completed);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let repo = create_test_repository().await;

        let result = repo.update(999, patch(Some("x"), None, None)).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_empty_patch_is_validation_error() {
        let repo = create_test_repository().await;
        repo.insert(1, patch(Some("a"), None, None)).await.unwrap();

        let result = repo.update(1, TodoPatch::default()).await;
        assert!(result.unwrap_err().is_validation());

        // The row is untouched
        let todo = repo.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(todo.text.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_update_can_change_id() {
        let repo = create_test_repository().await;
        repo.insert(1, patch(Some("a"), None, None)).await.unwrap();

        let fields = TodoPatch {
            id: Some(2),
            ..TodoPatch::default()
        };
        repo.update(1, fields).await.unwrap();

        assert!(repo.get_by_id(1).await.unwrap().is_none());
        assert_eq!(repo.get_by_id(2).await.unwrap().unwrap().text.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_row() {
        let repo = create_test_repository().await;
        repo.insert(1, patch(Some("a"), None, None)).await.unwrap();
        repo.insert(2, patch(Some("b"), None, None)).await.unwrap();

        repo.delete(1).await.unwrap();
        assert_eq!(repo.list_all().await.unwrap().len(), 1);

        // A second delete on the same id reports failure
        let result = repo.delete(1).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_not_found() {
        let repo = create_test_repository().await;

        let result = repo.delete(999).await;
        let error = result.unwrap_err();
        assert!(error.is_not_found());
        assert!(!error.to_string().is_empty());
    }
}
