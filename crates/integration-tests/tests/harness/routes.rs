//! Stand-in API routes exercising every fault kind
//!
//! There is no persistence layer; handlers fabricate their results

use anyhow::Context;
use axum::extract::Path;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use http::StatusCode;
use jiff::Timestamp;
use todo_core::{NewTodo, Todo, TodoPatch};
use todo_server::{Fault, ValidJson};

pub fn api_routes() -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", patch(update_todo).delete(delete_todo))
        .route("/explode", get(explode))
        .route("/unavailable", get(unavailable))
        .route("/panic", get(panic_handler))
        .route("/raw-teapot", post(raw_teapot))
}

pub fn sample_todo(id: &str, title: &str) -> Todo {
    let now = Timestamp::UNIX_EPOCH;
    Todo {
        id: id.to_owned(),
        title: title.to_owned(),
        description: None,
        completed: false,
        user_id: None,
        created_at: now,
        done_at: None,
        updated_at: now,
        deleted_at: None,
    }
}

async fn list_todos() -> Result<Json<Vec<Todo>>, Fault> {
    Err(Fault::conflict("Conflict"))
}

async fn create_todo(ValidJson(new): ValidJson<NewTodo>) -> (StatusCode, Json<Todo>) {
    let mut todo = sample_todo("1", &new.title);
    todo.description = new.description;
    (StatusCode::CREATED, Json(todo))
}

async fn update_todo(Path(id): Path<String>, ValidJson(patch): ValidJson<TodoPatch>) -> Result<Json<Todo>, Fault> {
    if id != "1" {
        return Err(Fault::not_found(format!("todo {id} not found")));
    }

    let mut todo = sample_todo(&id, patch.title.as_deref().unwrap_or("existing"));
    todo.completed = patch.completed.unwrap_or(false);
    Ok(Json(todo))
}

async fn delete_todo(Path(_id): Path<u64>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn explode() -> Result<Json<Todo>, Fault> {
    let todo = load_todo().context("loading todos")?;
    Ok(Json(todo))
}

fn load_todo() -> anyhow::Result<Todo> {
    anyhow::bail!("db connection lost")
}

async fn unavailable() -> Result<Json<Todo>, Fault> {
    Err(Fault::classified(StatusCode::SERVICE_UNAVAILABLE, "replica db-2 is down"))
}

async fn panic_handler() -> Json<Todo> {
    panic!("poisoned state: secret token abc123")
}

async fn raw_teapot() -> (StatusCode, &'static str) {
    (StatusCode::IM_A_TEAPOT, "short and stout")
}
