pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 4567;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DB_LOCAL_HOST: &str = "localhost";
pub const DEFAULT_DB_LOCAL_NAME: &str = "todos";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_MIN_IDLE: u32 = 1;
pub const DEFAULT_SESSION_COOKIE: &str = "todo_lists_session";
pub const DEFAULT_FLASH_TTL_SECS: u64 = 600;

/// Fallback variable for the production connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
