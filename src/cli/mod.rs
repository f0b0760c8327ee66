//! CLI interface for libdfa
//!
//! One-shot subcommands for listing, describing, checking and rendering
//! automata, plus persistent settings shared with the REPL.

pub mod args;
pub mod commands;
pub mod paths;

pub use args::{Cli, Commands};
pub use paths::{config_dir, PersistentConfig};
