use std::sync::Arc;

use axum::{
    Form, Router,
    extract::Path,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use sea_orm::{DbErr, ExecResult, SqlErr};
use serde::Deserialize;

use super::{
    LISTS_PATH, is_xhr, list_path,
    views::{EditListTemplate, ListTemplate, ListsTemplate, NewListTemplate, render, sort_lists},
};
use crate::{
    db::{ListRepository, TodoList},
    error::AppError,
    session::Session,
    state::AppState,
    validation::{LIST_NAME_NOT_UNIQUE, error_for_list_name},
};

pub const LIST_NOT_FOUND: &str = "The specified list was not found.";
pub const LIST_CREATED: &str = "The list has been created.";
pub const LIST_UPDATED: &str = "The list has been updated.";
pub const LIST_DELETED: &str = "The list has been deleted.";
pub const TODOS_COMPLETED: &str = "All todos have been completed.";

#[derive(Debug, Deserialize)]
pub struct ListForm {
    #[serde(default)]
    pub list_name: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/lists", get(index).post(create))
        .route("/lists/new", get(new_list))
        .route("/lists/{id}", get(show).post(update))
        .route("/lists/{id}/edit", get(edit))
        .route("/lists/{id}/delete", post(destroy))
        .route("/lists/{id}/complete_all", post(complete_all))
        .with_state(state)
}

/// Loads a list or abandons the request with a flash error and a redirect
/// to the overview.
pub(crate) async fn load_list(
    storage: &ListRepository,
    session: &Session,
    id: i32,
) -> Result<TodoList, AppError> {
    match storage.find_list(id).await? {
        Some(list) => Ok(list),
        None => {
            session.flash_error(LIST_NOT_FOUND);
            Err(AppError::redirect(LISTS_PATH))
        }
    }
}

async fn index(storage: ListRepository, session: Session) -> Result<Response, AppError> {
    let lists = storage.all_lists().await?;
    render(&ListsTemplate {
        flash: session.take_flash(),
        lists: sort_lists(&lists),
    })
}

async fn new_list(session: Session) -> Result<Response, AppError> {
    render(&NewListTemplate {
        flash: session.take_flash(),
        list_name: String::new(),
    })
}

async fn create(
    storage: ListRepository,
    session: Session,
    Form(form): Form<ListForm>,
) -> Result<Response, AppError> {
    let list_name = form.list_name.trim().to_string();
    let lists = storage.all_lists().await?;

    let error = match error_for_list_name(&list_name, &lists) {
        Some(error) => Some(error),
        None => name_conflict(storage.create_list(&list_name).await)?,
    };
    if let Some(error) = error {
        session.flash_error(error);
        return render(&NewListTemplate {
            flash: session.take_flash(),
            list_name,
        });
    }

    tracing::info!(list_name = %list_name, "list created");
    session.flash_success(LIST_CREATED);
    Ok(Redirect::to(LISTS_PATH).into_response())
}

async fn show(
    storage: ListRepository,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let list = load_list(&storage, &session, id).await?;
    render(&ListTemplate::new(session.take_flash(), &list, String::new()))
}

async fn edit(
    storage: ListRepository,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let list = load_list(&storage, &session, id).await?;
    render(&EditListTemplate {
        flash: session.take_flash(),
        list_name: list.name.clone(),
        list: &list,
    })
}

async fn update(
    storage: ListRepository,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<ListForm>,
) -> Result<Response, AppError> {
    let list_name = form.list_name.trim().to_string();
    let list = load_list(&storage, &session, id).await?;
    let lists = storage.all_lists().await?;

    let error = match error_for_list_name(&list_name, &lists) {
        Some(error) => Some(error),
        None => name_conflict(storage.update_list_name(id, &list_name).await)?,
    };
    if let Some(error) = error {
        session.flash_error(error);
        return render(&EditListTemplate {
            flash: session.take_flash(),
            list: &list,
            list_name,
        });
    }

    session.flash_success(LIST_UPDATED);
    Ok(Redirect::to(&list_path(id)).into_response())
}

async fn destroy(
    storage: ListRepository,
    session: Session,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    storage.delete_list(id).await?;

    if is_xhr(&headers) {
        return Ok(LISTS_PATH.into_response());
    }
    session.flash_success(LIST_DELETED);
    Ok(Redirect::to(LISTS_PATH).into_response())
}

async fn complete_all(
    storage: ListRepository,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    load_list(&storage, &session, id).await?;
    storage.mark_all_complete(id).await?;

    session.flash_success(TODOS_COMPLETED);
    Ok(Redirect::to(&list_path(id)).into_response())
}

/// The unique index on `lists.name` catches writes that raced past the
/// scan in [`error_for_list_name`].
fn name_conflict(result: Result<ExecResult, DbErr>) -> Result<Option<&'static str>, DbErr> {
    match result {
        Ok(_) => Ok(None),
        Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Ok(Some(LIST_NAME_NOT_UNIQUE))
        }
        Err(err) => Err(err),
    }
}
