//! Todo endpoints
//!
//! Each handler maps to exactly one store call. Validation runs in the
//! extractors, before any connection is checked out.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{TodoId, ValidTask};
use crate::models::{ListOrder, TodoRow};
use crate::state::AppState;

/// Add todo response
#[derive(Debug, Serialize)]
pub struct AddTodoResponse {
    pub message: &'static str,
    pub id: i64,
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// POST /add, POST /todos/add
async fn add_todo(
    State(state): State<AppState>,
    ValidTask(task): ValidTask,
) -> Result<(StatusCode, Json<AddTodoResponse>), ApiError> {
    let id = state.store().insert(&task, Utc::now()).await?;
    tracing::info!(id, task = %task.as_str(), "Todo added");

    Ok((
        StatusCode::CREATED,
        Json(AddTodoResponse {
            message: "Task added",
            id,
        }),
    ))
}

/// GET /list, GET /todos/list - newest first
async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<TodoRow>>, ApiError> {
    let todos = state.store().select_all(ListOrder::NewestFirst).await?;
    tracing::info!(count = todos.len(), "Retrieved todos");
    Ok(Json(todos))
}

/// DELETE /todos/{id}
async fn delete_todo(
    State(state): State<AppState>,
    TodoId(id): TodoId,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state.store().delete_by_id(id).await?;
    if affected == 0 {
        return Err(ApiError::NotFound { id: id.to_string() });
    }

    tracing::info!(id, "Todo deleted");
    Ok(Json(MessageResponse {
        message: "Todo deleted",
    }))
}

/// Todo routes, mounted both at the root and under `/todos`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_todo))
        .route("/list", get(list_todos))
        .route("/todos/add", post(add_todo))
        .route("/todos/list", get(list_todos))
        .route("/todos/{id}", delete(delete_todo))
}
