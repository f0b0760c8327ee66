//! Core command definitions and types shared between CLI and REPL

use crate::simulation::{Simulation, Verdict};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while carrying out a command
#[derive(Debug, Error)]
pub enum CommandError {
    /// An output file could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Destination path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Check parameters used by both CLI and REPL
#[derive(Debug, Clone, Default)]
pub struct CheckParams {
    /// The string to test
    pub input: String,
    /// Include the step table in the report
    pub show_steps: bool,
    /// Write the highlighted graph to this file
    pub dot_path: Option<PathBuf>,
}

impl CheckParams {
    /// Parameters for checking `input` with no extras
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// Toggle the step table
    pub fn with_steps(mut self, show_steps: bool) -> Self {
        self.show_steps = show_steps;
        self
    }

    /// Write the highlighted graph to `path`
    pub fn with_dot(mut self, path: impl Into<PathBuf>) -> Self {
        self.dot_path = Some(path.into());
        self
    }
}

/// Outcome of a check, ready for display.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// The run itself
    pub simulation: Simulation,
    /// `VALID`, `INVALID` or `MALFORMED`
    pub headline: &'static str,
    /// One-sentence explanation of the verdict
    pub message: String,
    /// Visited states joined with arrows
    pub path: String,
    /// Step table, when requested
    pub steps: Option<String>,
    /// Where the graph was written, when requested
    pub dot_path: Option<PathBuf>,
}

impl CheckReport {
    /// Process exit code for the verdict: 0 accepted, 1 rejected, 2 malformed.
    pub fn exit_code(&self) -> i32 {
        match self.simulation.verdict {
            Verdict::Accepted => 0,
            Verdict::Rejected => 1,
            Verdict::InvalidSymbol { .. } | Verdict::UndefinedTransition { .. } => 2,
        }
    }

    /// Everything below the headline, one item per line.
    pub fn body(&self) -> String {
        let mut lines = vec![self.message.clone(), format!("Path: {}", self.path)];
        if let Some(steps) = &self.steps {
            lines.push(String::new());
            lines.push(steps.clone());
        }
        if let Some(path) = &self.dot_path {
            lines.push(format!("Graph written to {}", path.display()));
        }
        lines.join("\n")
    }
}

/// Result of command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Output message to display
    pub output: String,
    /// Whether a persisted setting changed
    pub settings_changed: bool,
    /// Whether to exit (for REPL)
    pub should_exit: bool,
}

impl CommandResult {
    /// Create a successful result with output
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            settings_changed: false,
            should_exit: false,
        }
    }

    /// Create a result indicating a settings change
    pub fn settings_changed(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            settings_changed: true,
            should_exit: false,
        }
    }

    /// Create a result that signals exit
    pub fn exit(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            settings_changed: false,
            should_exit: true,
        }
    }
}
