use sea_orm::FromQueryResult;

/// A list assembled with its todos from the two tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    pub id: i32,
    pub name: String,
    pub todos: Vec<Todo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: i32,
    pub name: String,
    pub completed: bool,
}

impl TodoList {
    pub fn todos_count(&self) -> usize {
        self.todos.len()
    }

    pub fn todos_remaining_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    /// An empty list is never complete.
    pub fn is_complete(&self) -> bool {
        self.todos_count() > 0 && self.todos_remaining_count() == 0
    }

    pub fn css_class(&self) -> &'static str {
        if self.is_complete() { "complete" } else { "" }
    }
}

#[derive(Debug, FromQueryResult)]
pub(crate) struct ListRow {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, FromQueryResult)]
pub(crate) struct TodoRow {
    pub id: i32,
    pub name: String,
    pub completed: bool,
}

impl ListRow {
    pub(crate) fn with_todos(self, todos: Vec<Todo>) -> TodoList {
        TodoList {
            id: self.id,
            name: self.name,
            todos,
        }
    }
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            completed: row.completed,
        }
    }
}
