use std::time::Duration;

use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::AppConfig;

/// Picks the store for the current deployment mode: the configured URL in
/// production, the fixed local database everywhere else.
pub fn database_url(cfg: &AppConfig) -> Result<String> {
    if cfg.general.environment.is_production() {
        return cfg
            .database
            .url
            .clone()
            .context("DATABASE_URL is required in production");
    }

    Ok(format!(
        "postgres://{}/{}",
        cfg.database.local_host, cfg.database.local_name
    ))
}

pub async fn connect(cfg: &AppConfig) -> Result<DatabaseConnection> {
    let url = database_url(cfg)?;
    info!(
        environment = cfg.general.environment.as_str(),
        database = %redact_url(&url),
        "connecting to database"
    );

    let mut options = ConnectOptions::new(url);
    options
        .max_connections(cfg.database.max_connections)
        .min_connections(cfg.database.min_idle)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .context("failed to connect to database")?;
    sync_schema(&db).await?;
    Ok(db)
}

/// Creates missing tables and indexes from the entity definitions.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<()> {
    info!("syncing database schema from entities");
    db.get_schema_registry("todo_lists::db::entities::*")
        .sync(db)
        .await
        .context("failed to sync database schema")?;
    Ok(())
}

fn redact_url(url: &str) -> String {
    let trimmed = url.trim();
    let Some((scheme, rest)) = trimmed.split_once("://") else {
        return "<invalid-url>".to_string();
    };
    match rest.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://<redacted>@{host}"),
        None => trimmed.to_string(),
    }
}
