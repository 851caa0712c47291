use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use todo_core::{TodoError, TodoItem, TodoPatch, TodoRepository};

/// Shared handler state: the repository behind the route table
pub type AppState = Arc<dyn TodoRepository>;

/// JSON body for every user-visible error
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Wrapper turning a `TodoError` into an HTTP response.
///
/// The status code comes from `TodoError::status_code()`; the body is always
/// a JSON object with a single non-empty `error` string.
pub struct ApiError(TodoError);

impl From<TodoError> for ApiError {
    fn from(error: TodoError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }

        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Build the route table, bound once at startup
pub fn router(repository: AppState) -> Router {
    Router::new()
        .route("/todos", get(list_todos))
        .route(
            "/todos/{id}",
            axum::routing::post(create_todo)
                .put(update_todo)
                .delete(delete_todo),
        )
        .route("/health", get(health))
        .with_state(repository)
}

/// GET /todos - 200 with the full list, ordered by id
async fn list_todos(State(repo): State<AppState>) -> Result<Json<Vec<TodoItem>>, ApiError> {
    let todos = repo.list_all().await?;
    Ok(Json(todos))
}

/// POST /todos/{id} - 201 empty on success, 500 if the insert fails
async fn create_todo(
    State(repo): State<AppState>,
    Path(id): Path<i64>,
    Json(fields): Json<TodoPatch>,
) -> Result<StatusCode, ApiError> {
    repo.insert(id, fields).await?;
    Ok(StatusCode::CREATED)
}

/// PUT /todos/{id} - 200 empty, 400 with no valid fields, 404 when absent.
///
/// Field presence is validated strictly before consulting storage.
async fn update_todo(
    State(repo): State<AppState>,
    Path(id): Path<i64>,
    Json(fields): Json<TodoPatch>,
) -> Result<StatusCode, ApiError> {
    if fields.is_empty() {
        return Err(TodoError::no_valid_fields().into());
    }
    repo.update(id, fields).await?;
    Ok(StatusCode::OK)
}

/// DELETE /todos/{id} - 204 empty, 404 when absent
async fn delete_todo(
    State(repo): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    repo.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /health - connectivity probe against the repository
async fn health(State(repo): State<AppState>) -> Result<StatusCode, ApiError> {
    repo.health_check().await?;
    Ok(StatusCode::OK)
}
