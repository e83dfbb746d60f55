use std::path::{Path, PathBuf};

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Configuration read from `.env` and `APP_*` variables, sections split by
/// `__` (`APP_DATABASE__MAX_CONNECTIONS`).
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    /// `.env` files tried in order; the working directory is the last resort.
    fn dotenv_candidates() -> Vec<PathBuf> {
        vec![Path::new(env!("CARGO_MANIFEST_DIR")).join(".env")]
    }

    /// Hook for values that do not follow the prefixed naming scheme.
    fn apply_fallbacks(&mut self) {}

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        load_dotenv(&Self::dotenv_candidates());

        let source = config_rs::Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator(Self::SEPARATOR)
            .try_parsing(true);

        let mut cfg: Self = config_rs::Config::builder()
            .add_source(source)
            .build()
            .and_then(|settings| settings.try_deserialize())
            .with_context(|| format!("failed to load {}_* configuration", Self::PREFIX))?;

        cfg.apply_fallbacks();
        cfg.validate()?;
        Ok(cfg)
    }
}

fn load_dotenv(candidates: &[PathBuf]) {
    let loaded = candidates
        .iter()
        .any(|path| dotenvy::from_path(path).is_ok());
    if !loaded {
        // A missing .env is normal outside development.
        let _ = dotenvy::dotenv();
    }
}
