use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;

use crate::{
    config::{AppConfig, Environment},
    routes::router,
    state::AppState,
};

pub fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.general.environment = Environment::Test;
    cfg.general.public_dir = Some(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("public")
            .display()
            .to_string(),
    );
    cfg
}

pub fn test_state(db: DatabaseConnection) -> Arc<AppState> {
    AppState::new(test_config(), db)
}

pub fn test_router(state: &Arc<AppState>) -> Router {
    router(Arc::clone(state))
}
