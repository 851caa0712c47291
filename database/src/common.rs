use sqlx::{sqlite::SqliteRow, Row};
use todo_core::{
    error::{Result, TodoError},
    models::TodoItem,
};

/// Convert a SQLite row to a TodoItem model
pub fn row_to_todo(row: &SqliteRow) -> Result<TodoItem> {
    Ok(TodoItem {
        id: row.get("id"),
        text: row.get("text"),
        due_date: row.get("dueDate"),
        completed: row.get("completed"),
    })
}

/// Convert a sqlx error to a TodoError
///
/// A UNIQUE constraint violation on the primary key becomes `DuplicateId`
/// when the offending id is known, so insert conflicts surface as a failed
/// write rather than being silently ignored.
pub fn sqlx_error_to_todo_error(err: sqlx::Error, id: Option<i64>) -> TodoError {
    match &err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().unwrap_or_default();
            let message = db_err.message();

            if code == "1555" || code == "2067" || message.contains("UNIQUE constraint failed") {
                match id {
                    Some(id) => TodoError::DuplicateId(id),
                    None => TodoError::Database(format!("Unique constraint violation: {message}")),
                }
            } else {
                TodoError::Database(format!("Database constraint error: {message}"))
            }
        }
        sqlx::Error::RowNotFound => match id {
            Some(id) => TodoError::not_found_id(id),
            None => TodoError::NotFound("Row not found".to_string()),
        },
        sqlx::Error::PoolTimedOut => {
            TodoError::Database("Database connection pool timed out".to_string())
        }
        _ => TodoError::Database(format!("Database error: {err}")),
    }
}
