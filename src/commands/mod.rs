//! Shared command logic for CLI and REPL
//!
//! Both front-ends check strings, render graphs and describe automata the
//! same way; the logic lives here and returns plain text, leaving colour and
//! layout of the surrounding output to the caller.

pub mod core;
pub mod handlers;

pub use core::{CheckParams, CheckReport, CommandError, CommandResult};
pub use handlers::check::run_check;
pub use handlers::describe::{describe_entry, list_entries};
pub use handlers::render::{run_render, write_dot};
