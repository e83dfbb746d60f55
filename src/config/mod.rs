pub mod configs;
pub mod defaults;
pub mod envconfig;
pub mod validate;

pub use configs::{
    AppConfig, DatabaseConfig, Environment, GeneralConfig, LoggingConfig, SessionConfig,
};
pub use envconfig::EnvConfig;
