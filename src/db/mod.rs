pub mod connection;
pub mod entities;
pub mod list_repo;
pub mod models;
pub mod query;

pub use list_repo::ListRepository;
pub use models::{Todo, TodoList};
pub use query::QueryExecutor;
