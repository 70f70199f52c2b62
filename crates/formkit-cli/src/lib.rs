//! Library half of the `formkit` command-line tool.

pub mod logging;
pub mod script;
pub mod summary;
