//! Name rules for lists and todos. Failures are user-facing messages, not
//! errors.

use std::ops::RangeInclusive;

use crate::db::TodoList;

pub const NAME_LENGTH: RangeInclusive<usize> = 1..=100;

pub const LIST_NAME_NOT_UNIQUE: &str = "List name must be unique.";
pub const LIST_NAME_LENGTH: &str = "List name must be between 1 and 100 characters.";
pub const TODO_NAME_LENGTH: &str = "Todo must be between 1 and 100 characters.";

/// Checks a trimmed list name against every existing list, including one
/// that is being renamed.
pub fn error_for_list_name(name: &str, lists: &[TodoList]) -> Option<&'static str> {
    if lists.iter().any(|list| list.name == name) {
        Some(LIST_NAME_NOT_UNIQUE)
    } else if !has_valid_length(name) {
        Some(LIST_NAME_LENGTH)
    } else {
        None
    }
}

pub fn error_for_todo(name: &str) -> Option<&'static str> {
    if has_valid_length(name) {
        None
    } else {
        Some(TODO_NAME_LENGTH)
    }
}

fn has_valid_length(name: &str) -> bool {
    NAME_LENGTH.contains(&name.chars().count())
}
