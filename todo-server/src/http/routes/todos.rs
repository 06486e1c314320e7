//! Todo endpoints
//!
//! Each handler borrows one session from the pool for the length of the
//! request: a plain connection for reads, a transaction for mutations.
//! The session is returned to the pool when it drops, on every path;
//! an uncommitted transaction rolls back on drop.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Todo, TodoRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{TodoId, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::{Pagination, PaginationParams, TodoFields};

/// Todo response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            completed: t.completed,
        }
    }
}

/// Delete acknowledgement
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// GET /todos - list todos with skip/limit
async fn list_todos(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<PaginationParams>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let page = Pagination::from(params);
    let mut conn = state.pool.acquire().await?;
    let todos = TodoRepo::new(&mut conn).list(page).await?;

    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// POST /todos - create a todo
async fn create_todo(
    State(state): State<Arc<AppState>>,
    ValidJson(fields): ValidJson<TodoFields>,
) -> Result<Json<TodoResponse>, ApiError> {
    let mut tx = state.pool.begin().await?;
    let todo = TodoRepo::new(&mut tx).create(&fields).await?;
    tx.commit().await?;

    tracing::info!(id = todo.id, "todo created");
    Ok(Json(TodoResponse::from(todo)))
}

/// GET /todos/{id} - get a single todo
async fn get_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> Result<Json<TodoResponse>, ApiError> {
    let mut conn = state.pool.acquire().await?;
    let todo = TodoRepo::new(&mut conn)
        .get(id)
        .await?
        .ok_or_else(|| ApiError::todo_not_found(id))?;

    Ok(Json(TodoResponse::from(todo)))
}

/// PUT /todos/{id} - replace all fields of a todo
async fn update_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
    ValidJson(fields): ValidJson<TodoFields>,
) -> Result<Json<TodoResponse>, ApiError> {
    let mut tx = state.pool.begin().await?;
    let todo = TodoRepo::new(&mut tx)
        .replace(id, &fields)
        .await?
        .ok_or_else(|| ApiError::todo_not_found(id))?;
    tx.commit().await?;

    tracing::info!(id, "todo updated");
    Ok(Json(TodoResponse::from(todo)))
}

/// DELETE /todos/{id} - delete a todo
async fn delete_todo(
    State(state): State<Arc<AppState>>,
    TodoId(id): TodoId,
) -> Result<Json<StatusResponse>, ApiError> {
    let mut tx = state.pool.begin().await?;
    if !TodoRepo::new(&mut tx).delete(id).await? {
        return Err(ApiError::todo_not_found(id));
    }
    tx.commit().await?;

    tracing::info!(id, "todo deleted");
    Ok(Json(StatusResponse { status: "success" }))
}

/// Todo routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_keeps_null_description() {
        let response = TodoResponse::from(Todo {
            id: 1,
            title: "Buy milk".into(),
            description: None,
            completed: false,
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "id": 1,
                "title": "Buy milk",
                "description": null,
                "completed": false
            })
        );
    }

    #[test]
    fn status_response_shape() {
        let body = serde_json::to_value(StatusResponse { status: "success" }).unwrap();
        assert_eq!(body, json!({ "status": "success" }));
    }
}
