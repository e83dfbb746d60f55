use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, db::ListRepository, session::SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Arc<Self> {
        let sessions = SessionStore::new(
            config.session.cookie_name.clone(),
            config.session.flash_ttl(),
        );
        Arc::new(Self {
            config,
            db,
            sessions,
        })
    }

    /// Repository handle for a single request.
    pub fn storage(&self) -> ListRepository {
        ListRepository::new(&self.db)
    }
}
