//! Command surface: serializable API plus the text shell front end.

pub mod api;
pub mod cli;

pub use api::{dispatch, Command, ErrorKind, Response};
pub use cli::{parse_line, ShellInput};
