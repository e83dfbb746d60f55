use std::sync::Arc;

use axum::{Router, middleware};

use crate::{middleware::session_middleware, state::AppState};

mod extract;
pub mod lists;
pub mod public;
pub mod todos;
pub mod views;

pub use extract::is_xhr;

pub const LISTS_PATH: &str = "/lists";

pub fn list_path(id: i32) -> String {
    format!("{LISTS_PATH}/{id}")
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public::router(&state.config.general))
        .merge(lists::router(state.clone()))
        .merge(todos::router(state.clone()))
        .layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            session_middleware,
        ))
}
