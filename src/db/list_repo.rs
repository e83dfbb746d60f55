use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, ExecResult, FromQueryResult, TransactionTrait,
};

use super::{
    models::{ListRow, Todo, TodoList, TodoRow},
    query::QueryExecutor,
};

const SELECT_LIST: &str = "SELECT id, name FROM lists WHERE id = $1";
const SELECT_LISTS: &str = "SELECT id, name FROM lists ORDER BY id";
const SELECT_TODOS: &str = "SELECT id, name, completed FROM todos WHERE list_id = $1 ORDER BY id";
const INSERT_LIST: &str = "INSERT INTO lists (name) VALUES ($1)";
const DELETE_LIST_TODOS: &str = "DELETE FROM todos WHERE list_id = $1";
const DELETE_LIST: &str = "DELETE FROM lists WHERE id = $1";
const INSERT_TODO: &str = "INSERT INTO todos (name, list_id) VALUES ($1, $2)";
const UPDATE_TODO_STATUS: &str = "UPDATE todos SET completed = $1 WHERE list_id = $2 AND id = $3";
const DELETE_TODO: &str = "DELETE FROM todos WHERE list_id = $1 AND id = $2";
const COMPLETE_ALL_TODOS: &str = "UPDATE todos SET completed = true WHERE list_id = $1";
const UPDATE_LIST_NAME: &str = "UPDATE lists SET name = $1 WHERE id = $2";

/// Lists and their todos, read and written through parameterized SQL.
///
/// Write operations hand back the driver's command result untouched.
#[derive(Clone)]
pub struct ListRepository {
    db: DatabaseConnection,
}

impl ListRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn executor(&self) -> QueryExecutor<'_, DatabaseConnection> {
        QueryExecutor::new(&self.db)
    }

    /// `None` when no list has this id.
    pub async fn find_list(&self, id: i32) -> Result<Option<TodoList>, DbErr> {
        let rows = self.executor().query(SELECT_LIST, vec![id.into()]).await?;
        let Some(row) = rows.first() else {
            return Ok(None);
        };
        let list = ListRow::from_query_result(row, "")?;
        let todos = find_todos_for_list(&self.db, list.id).await?;
        Ok(Some(list.with_todos(todos)))
    }

    /// One query for the lists, then one per list for its todos.
    pub async fn all_lists(&self) -> Result<Vec<TodoList>, DbErr> {
        let rows = self.executor().query(SELECT_LISTS, Vec::new()).await?;
        let mut lists = Vec::with_capacity(rows.len());
        for row in &rows {
            let list = ListRow::from_query_result(row, "")?;
            let todos = find_todos_for_list(&self.db, list.id).await?;
            lists.push(list.with_todos(todos));
        }
        Ok(lists)
    }

    pub async fn create_list(&self, name: &str) -> Result<ExecResult, DbErr> {
        self.executor().execute(INSERT_LIST, vec![name.into()]).await
    }

    /// Deletes the list's todos and then the list, in one transaction.
    pub async fn delete_list(&self, id: i32) -> Result<ExecResult, DbErr> {
        let txn = self.db.begin().await?;
        let executor = QueryExecutor::new(&txn);
        executor.execute(DELETE_LIST_TODOS, vec![id.into()]).await?;
        let result = executor.execute(DELETE_LIST, vec![id.into()]).await?;
        txn.commit().await?;
        Ok(result)
    }

    /// `completed` is left to the column default.
    pub async fn create_todo(&self, list_id: i32, name: &str) -> Result<ExecResult, DbErr> {
        self.executor()
            .execute(INSERT_TODO, vec![name.into(), list_id.into()])
            .await
    }

    pub async fn update_todo_status(
        &self,
        list_id: i32,
        todo_id: i32,
        completed: bool,
    ) -> Result<ExecResult, DbErr> {
        self.executor()
            .execute(
                UPDATE_TODO_STATUS,
                vec![completed.into(), list_id.into(), todo_id.into()],
            )
            .await
    }

    pub async fn delete_todo(&self, list_id: i32, todo_id: i32) -> Result<ExecResult, DbErr> {
        self.executor()
            .execute(DELETE_TODO, vec![list_id.into(), todo_id.into()])
            .await
    }

    pub async fn mark_all_complete(&self, list_id: i32) -> Result<ExecResult, DbErr> {
        self.executor()
            .execute(COMPLETE_ALL_TODOS, vec![list_id.into()])
            .await
    }

    pub async fn update_list_name(&self, id: i32, name: &str) -> Result<ExecResult, DbErr> {
        self.executor()
            .execute(UPDATE_LIST_NAME, vec![name.into(), id.into()])
            .await
    }
}

async fn find_todos_for_list<C: ConnectionTrait>(
    conn: &C,
    list_id: i32,
) -> Result<Vec<Todo>, DbErr> {
    let rows = QueryExecutor::new(conn)
        .query(SELECT_TODOS, vec![list_id.into()])
        .await?;
    rows.iter()
        .map(|row| TodoRow::from_query_result(row, "").map(Todo::from))
        .collect()
}
