use std::path::PathBuf;

use axum::{Router, response::Redirect, routing::get};
use tower_http::services::ServeDir;

use super::LISTS_PATH;
use crate::config::GeneralConfig;

/// `/` plus static assets for every path no other route claims.
pub fn router(cfg: &GeneralConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .fallback_service(ServeDir::new(resolve_public_dir(cfg)))
}

async fn index() -> Redirect {
    Redirect::to(LISTS_PATH)
}

fn resolve_public_dir(cfg: &GeneralConfig) -> PathBuf {
    if let Some(path) = cfg.public_dir.as_ref() {
        return PathBuf::from(path);
    }

    if let Ok(current_dir) = std::env::current_dir() {
        let candidate = current_dir.join("public");
        if candidate.exists() {
            return candidate;
        }
    }

    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let candidate = exe_dir.join("public");
        if candidate.exists() {
            return candidate;
        }
    }

    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("public")
}
