//! Interactive REPL for libdfa
//!
//! Pick an automaton with `use`, test strings with `check`, and write the
//! graph of the last run with `render`. The session (which automaton is
//! selected, what the last run was) lives in [`ReplState`]; line handling and
//! continuation are tracked by [`ReplStateMachine`].

pub mod command;
pub mod helper;
pub mod highlighter;
pub mod state;
pub mod state_machine;

pub use crate::commands::CommandResult;
pub use command::Command;
pub use helper::DfaHelper;
pub use state::{ReplState, SessionState};
pub use state_machine::{Action, ReplEvent, ReplPhase, ReplStateMachine};

use std::path::PathBuf;

/// Name shown at the start of every prompt
pub const PROMPT_NAME: &str = "libdfa";

/// Prompt for a continued line
pub const CONTINUATION_PROMPT: &str = "...> ";

/// Entries kept in the line history
pub const MAX_HISTORY: usize = 1000;

/// `~/.libdfa_history`, when there is a home directory
pub fn history_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".libdfa_history"))
}
