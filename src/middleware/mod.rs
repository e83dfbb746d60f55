mod panic;

pub use crate::session::session_middleware;
pub use panic::catch_panic_layer;
