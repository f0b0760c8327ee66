//! Read-eval loop control
//!
//! The loop hands every readline result to [`ReplStateMachine::on_input`].
//! A parsed command comes back as [`Action::Run`]; the loop executes it
//! against the session and reports the outcome through
//! [`ReplStateMachine::on_result`]. The machine owns the partial line of a
//! continuation and decides when the loop ends.

use super::command::Command;
use crate::commands::CommandResult;
use colored::Colorize;

/// Where the loop stands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReplPhase {
    /// Waiting for a command line
    #[default]
    Ready,
    /// Collecting a line that ended in `\`
    Continuation {
        /// Text gathered so far, without the trailing backslashes
        buffer: String,
    },
    /// A command was handed out and its result is pending
    Executing,
    /// The loop is over
    Exiting,
}

/// What readline produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplEvent {
    /// A line, already trimmed
    Line(String),
    /// Ctrl+C
    Interrupted,
    /// Ctrl+D
    Eof,
}

/// What the loop does after an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Execute the command, then call [`ReplStateMachine::on_result`]
    Run(Command),
    /// Print the message, if any, and read the next line
    Show(Option<String>),
}

/// Phase tracking for the REPL loop
#[derive(Debug, Default)]
pub struct ReplStateMachine {
    phase: ReplPhase,
}

impl ReplStateMachine {
    /// A machine waiting for its first line
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase
    pub fn phase(&self) -> &ReplPhase {
        &self.phase
    }

    /// Whether the loop should stop
    pub fn is_terminal(&self) -> bool {
        self.phase == ReplPhase::Exiting
    }

    /// Whether the next line continues the previous one
    pub fn is_continuing(&self) -> bool {
        matches!(self.phase, ReplPhase::Continuation { .. })
    }

    /// Handle one readline result.
    pub fn on_input(&mut self, event: ReplEvent) -> Action {
        let phase = std::mem::take(&mut self.phase);
        match (phase, event) {
            (ReplPhase::Exiting, _) => {
                self.phase = ReplPhase::Exiting;
                Action::Show(None)
            }
            (_, ReplEvent::Eof) => {
                self.phase = ReplPhase::Exiting;
                Action::Show(Some("Goodbye!".green().to_string()))
            }
            (ReplPhase::Continuation { .. }, ReplEvent::Interrupted) => {
                Action::Show(Some("Continuation cancelled".yellow().to_string()))
            }
            (_, ReplEvent::Interrupted) => Action::Show(Some(
                "^C (Use 'exit' or Ctrl+D to quit)".yellow().to_string(),
            )),
            (ReplPhase::Continuation { mut buffer }, ReplEvent::Line(line)) => {
                // No separator: a test string may span lines.
                buffer.push_str(&line);
                self.accept(buffer)
            }
            (phase, ReplEvent::Line(line)) => {
                if phase == ReplPhase::Executing {
                    tracing::warn!("input arrived before the last command finished");
                }
                self.accept(line)
            }
        }
    }

    /// Handle the outcome of the command handed out by [`Action::Run`].
    ///
    /// Returns the text to print.
    pub fn on_result(&mut self, result: anyhow::Result<CommandResult>) -> Option<String> {
        if self.phase != ReplPhase::Executing {
            tracing::warn!(phase = ?self.phase, "command result without a running command");
        }
        match result {
            Ok(result) => {
                self.phase = if result.should_exit {
                    ReplPhase::Exiting
                } else {
                    ReplPhase::Ready
                };
                Some(result.output).filter(|output| !output.is_empty())
            }
            Err(e) => {
                self.phase = ReplPhase::Ready;
                Some(format!("{}: {:#}", "Error".red().bold(), e))
            }
        }
    }

    fn accept(&mut self, text: String) -> Action {
        if let Some(head) = text.strip_suffix('\\') {
            self.phase = ReplPhase::Continuation {
                buffer: head.trim_end_matches('\\').to_string(),
            };
            return Action::Show(None);
        }
        if text.trim().is_empty() {
            self.phase = ReplPhase::Ready;
            return Action::Show(None);
        }

        match Command::parse(&text) {
            Ok(command) => {
                self.phase = ReplPhase::Executing;
                Action::Run(command)
            }
            Err(e) => {
                self.phase = ReplPhase::Ready;
                Action::Show(Some(format!("{}: {}", "Parse error".red().bold(), e)))
            }
        }
    }
}
