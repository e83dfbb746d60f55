//! Table definitions. These only drive schema sync at start-up; the
//! repository talks to the tables through raw statements.

pub mod list;
pub mod todo;

