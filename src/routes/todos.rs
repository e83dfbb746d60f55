use std::sync::Arc;

use axum::{
    Form, Router,
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::post,
};
use serde::Deserialize;

use super::{
    is_xhr, list_path,
    lists::load_list,
    views::{ListTemplate, render},
};
use crate::{
    db::ListRepository, error::AppError, session::Session, state::AppState,
    validation::error_for_todo,
};

pub const TODO_ADDED: &str = "The todo was added.";
pub const TODO_UPDATED: &str = "The todo has been updated.";
pub const TODO_DELETED: &str = "The todo was deleted.";

#[derive(Debug, Deserialize)]
pub struct TodoForm {
    #[serde(default)]
    pub todo: String,
}

#[derive(Debug, Deserialize)]
pub struct TodoStatusForm {
    #[serde(default)]
    pub completed: String,
}

impl TodoStatusForm {
    /// Anything other than the literal `true` marks the todo open.
    pub fn is_completed(&self) -> bool {
        self.completed == "true"
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/lists/{id}/todos", post(create))
        .route("/lists/{id}/todos/{todo_id}", post(update_status))
        .route("/lists/{id}/todos/{todo_id}/delete", post(destroy))
        .with_state(state)
}

async fn create(
    storage: ListRepository,
    session: Session,
    Path(list_id): Path<i32>,
    Form(form): Form<TodoForm>,
) -> Result<Response, AppError> {
    let list = load_list(&storage, &session, list_id).await?;
    let name = form.todo.trim().to_string();

    if let Some(error) = error_for_todo(&name) {
        session.flash_error(error);
        return render(&ListTemplate::new(session.take_flash(), &list, name));
    }

    storage.create_todo(list_id, &name).await?;
    session.flash_success(TODO_ADDED);
    Ok(Redirect::to(&list_path(list_id)).into_response())
}

async fn update_status(
    storage: ListRepository,
    session: Session,
    Path((list_id, todo_id)): Path<(i32, i32)>,
    Form(form): Form<TodoStatusForm>,
) -> Result<Response, AppError> {
    load_list(&storage, &session, list_id).await?;
    storage
        .update_todo_status(list_id, todo_id, form.is_completed())
        .await?;

    session.flash_success(TODO_UPDATED);
    Ok(Redirect::to(&list_path(list_id)).into_response())
}

async fn destroy(
    storage: ListRepository,
    session: Session,
    Path((list_id, todo_id)): Path<(i32, i32)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    load_list(&storage, &session, list_id).await?;
    storage.delete_todo(list_id, todo_id).await?;

    if is_xhr(&headers) {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    session.flash_success(TODO_DELETED);
    Ok(Redirect::to(&list_path(list_id)).into_response())
}
