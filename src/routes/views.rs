use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use crate::{
    db::{Todo, TodoList},
    error::AppError,
    session::Flash,
};

#[derive(Template)]
#[template(path = "lists.html")]
pub struct ListsTemplate<'a> {
    pub flash: Flash,
    pub lists: Vec<&'a TodoList>,
}

#[derive(Template)]
#[template(path = "new_list.html")]
pub struct NewListTemplate {
    pub flash: Flash,
    pub list_name: String,
}

#[derive(Template)]
#[template(path = "list.html")]
pub struct ListTemplate<'a> {
    pub flash: Flash,
    pub list: &'a TodoList,
    pub todos: Vec<&'a Todo>,
    pub todo_name: String,
}

impl<'a> ListTemplate<'a> {
    pub fn new(flash: Flash, list: &'a TodoList, todo_name: String) -> Self {
        Self {
            flash,
            list,
            todos: sort_todos(&list.todos),
            todo_name,
        }
    }
}

#[derive(Template)]
#[template(path = "edit_list.html")]
pub struct EditListTemplate<'a> {
    pub flash: Flash,
    pub list: &'a TodoList,
    pub list_name: String,
}

pub fn render(template: &impl Template) -> Result<Response, AppError> {
    Ok(Html(template.render()?).into_response())
}

/// Incomplete lists first, then complete ones; order within each group is
/// kept.
pub fn sort_lists(lists: &[TodoList]) -> Vec<&TodoList> {
    let (complete, mut incomplete): (Vec<&TodoList>, Vec<&TodoList>) =
        lists.iter().partition(|list| list.is_complete());
    incomplete.extend(complete);
    incomplete
}

pub fn sort_todos(todos: &[Todo]) -> Vec<&Todo> {
    let (complete, mut incomplete): (Vec<&Todo>, Vec<&Todo>) =
        todos.iter().partition(|todo| todo.completed);
    incomplete.extend(complete);
    incomplete
}
