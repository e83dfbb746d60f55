use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    let database = &cfg.database;
    match database.url.as_deref() {
        Some(url) if !is_postgres_url(url) => {
            errors.push("database.url must use the postgres:// or postgresql:// scheme".to_string());
        }
        None if cfg.general.environment.is_production() => {
            errors.push(
                "database.url (or DATABASE_URL) is required in production".to_string(),
            );
        }
        _ => {}
    }

    if database.local_name.trim().is_empty() {
        errors.push("database.local_name must not be empty".to_string());
    }

    if database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if database.min_idle > database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            database.min_idle, database.max_connections
        ));
    }

    if cfg.session.cookie_name.trim().is_empty() {
        errors.push("session.cookie_name must not be empty".to_string());
    }

    if cfg.session.flash_ttl_secs == 0 {
        errors.push("session.flash_ttl_secs must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

fn is_postgres_url(url: &str) -> bool {
    let normalized = url.trim().to_ascii_lowercase();
    normalized.starts_with("postgres://") || normalized.starts_with("postgresql://")
}
