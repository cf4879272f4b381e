use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, patch},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::{
    error::AppError,
    models::{CreateTodo, Todo},
    service::TodoService,
};

// === App State ===
#[derive(Debug, Clone)]
pub struct AppState {
    todos: TodoService,
}
impl AppState {
    pub fn new(todos: TodoService) -> Self {
        Self { todos }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/todo", get(list_todos).post(create_todo))
        .route("/api/todo/:id", patch(complete_todo).delete(delete_todo))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct Ack {
    success: bool,
}
impl Ack {
    fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

// === Routes ===
async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, AppError> {
    Ok(Json(state.todos.list()?))
}

async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<Json<Todo>, AppError> {
    let Json(input) = payload?;
    Ok(Json(state.todos.create(input)?))
}

async fn complete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, AppError> {
    state.todos.complete(&id)?;
    Ok(Ack::ok())
}

async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, AppError> {
    state.todos.delete(&id)?;
    Ok(Ack::ok())
}
