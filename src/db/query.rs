use sea_orm::{ConnectionTrait, DbErr, ExecResult, QueryResult, Statement, Value};
use tracing::info;

/// Runs parameterized statements (`$1`, `$2`, ...) against any connection,
/// logging each statement with its parameters before it is sent.
///
/// Binding is left to the driver; parameter values never end up in the SQL
/// text.
pub struct QueryExecutor<'c, C> {
    conn: &'c C,
}

impl<'c, C: ConnectionTrait> QueryExecutor<'c, C> {
    pub fn new(conn: &'c C) -> Self {
        Self { conn }
    }

    /// Returns the whole result set, materialized.
    pub async fn query(&self, sql: &str, params: Vec<Value>) -> Result<Vec<QueryResult>, DbErr> {
        let stmt = self.prepare(sql, params);
        self.conn.query_all_raw(stmt).await
    }

    pub async fn execute(&self, sql: &str, params: Vec<Value>) -> Result<ExecResult, DbErr> {
        let stmt = self.prepare(sql, params);
        self.conn.execute_raw(stmt).await
    }

    fn prepare(&self, sql: &str, params: Vec<Value>) -> Statement {
        info!(statement = sql, params = ?params, "sql");
        Statement::from_sql_and_values(self.conn.get_database_backend(), sql, params)
    }
}
