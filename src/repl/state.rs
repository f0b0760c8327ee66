//! REPL state management
//!
//! Holds the registry, the explicit session state (which automaton is
//! selected and what the last run was) and the display settings.

use crate::cli::paths::PersistentConfig;
use crate::commands::{run_check, write_dot, CheckParams, CheckReport};
use crate::registry::{AutomatonId, Entry, Registry};
use crate::render::to_dot;
use crate::simulation::Simulation;
use anyhow::{bail, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Where the session stands.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// No automaton chosen yet
    #[default]
    Uninitialized,
    /// An automaton is selected
    Ready {
        /// The selected automaton
        entry: Entry,
        /// The most recent check, highlighted by `render`
        last_run: Option<Simulation>,
    },
    /// Something failed that needs the user's attention; cleared by `use`
    Error {
        /// What went wrong
        reason: String,
    },
}

impl SessionState {
    /// The selected entry, if any
    pub fn entry(&self) -> Option<&Entry> {
        match self {
            Self::Ready { entry, .. } => Some(entry),
            _ => None,
        }
    }

    /// The last run on the selected entry, if any
    pub fn last_run(&self) -> Option<&Simulation> {
        match self {
            Self::Ready { last_run, .. } => last_run.as_ref(),
            _ => None,
        }
    }

    /// Short coloured label for the prompt
    pub fn prompt_context(&self) -> String {
        match self {
            Self::Uninitialized => "-".dimmed().to_string(),
            Self::Ready { entry, last_run } => {
                let id = entry.id.to_string().bright_yellow();
                match last_run {
                    Some(run) if run.is_accepted() => format!("{}{}", id, "✓".green()),
                    Some(_) => format!("{}{}", id, "✗".red()),
                    None => id.to_string(),
                }
            }
            Self::Error { .. } => "error".red().bold().to_string(),
        }
    }
}

/// REPL state
#[derive(Debug, Clone)]
pub struct ReplState {
    /// Available automata
    pub registry: Registry,
    /// Selected automaton and last run
    pub session: SessionState,
    /// Print the step table after every check
    pub show_steps: bool,
    /// Directory for `render` output
    pub dot_dir: Option<PathBuf>,
    /// Custom config file path
    pub config_file_path: Option<PathBuf>,
    /// Persisted default, kept while nothing is selected
    pub default_automaton: Option<String>,
}

impl ReplState {
    /// Create a new REPL state over `registry` with nothing selected
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            session: SessionState::Uninitialized,
            show_steps: false,
            dot_dir: None,
            config_file_path: None,
            default_automaton: None,
        }
    }

    /// Select an automaton, clearing any previous run or error
    pub fn select(&mut self, id: &str) -> Result<&Entry> {
        let entry = self.registry.select(id)?.clone();
        tracing::debug!(id = %entry.id, "selected automaton");
        self.session = SessionState::Ready {
            entry,
            last_run: None,
        };
        self.session
            .entry()
            .ok_or_else(|| anyhow::anyhow!("Session is not ready after selection"))
    }

    /// The selected entry, or an error telling the user to pick one
    pub fn entry(&self) -> Result<&Entry> {
        match &self.session {
            SessionState::Ready { entry, .. } => Ok(entry),
            SessionState::Uninitialized => bail!("No automaton selected, use 'use <id>'"),
            SessionState::Error { reason } => {
                bail!("{} (use 'use <id>' to continue)", reason)
            }
        }
    }

    /// Check `input` against the selected automaton and remember the run
    pub fn check(&mut self, input: &str) -> Result<CheckReport> {
        let params = CheckParams::new(input).with_steps(self.show_steps);
        let report = run_check(self.entry()?, &params)?;

        if let SessionState::Ready { last_run, .. } = &mut self.session {
            *last_run = Some(report.simulation.clone());
        }
        Ok(report)
    }

    /// Write the selected automaton as DOT, highlighting the last run.
    ///
    /// Without an explicit path the file is `<id>.dot` in the configured DOT
    /// directory (or the current directory).
    pub fn render(&self, path: Option<&Path>) -> Result<PathBuf> {
        let entry = self.entry()?;
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => self
                .dot_dir
                .clone()
                .unwrap_or_default()
                .join(format!("{}.dot", entry.id)),
        };

        write_dot(&path, &to_dot(&entry.automaton, self.session.last_run()))?;
        Ok(path)
    }

    /// Load extra definitions; a failure puts the session in the error state
    pub fn load_definitions(&mut self, path: &Path) -> Result<Vec<AutomatonId>> {
        match self.registry.load_definitions(path) {
            Ok(ids) => {
                // A reloaded entry replaces the selected one.
                if let Some(id) = self.session.entry().map(|e| e.id.clone()) {
                    if ids.contains(&id) {
                        self.select(id.as_str())?;
                    }
                }
                Ok(ids)
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(path = %path.display(), %reason, "failed to load definitions");
                self.session = SessionState::Error {
                    reason: reason.clone(),
                };
                bail!(reason)
            }
        }
    }

    /// Apply persisted settings; an unknown default automaton is ignored
    pub fn apply_config(&mut self, config: &PersistentConfig) {
        if let Some(steps) = config.show_steps {
            self.show_steps = steps;
        }
        if let Some(dir) = &config.dot_dir {
            self.dot_dir = Some(dir.clone());
        }
        self.default_automaton = config.default_automaton.clone();
        // An error from startup stays visible until the user picks.
        if matches!(self.session, SessionState::Error { .. }) {
            return;
        }
        if let Some(id) = &config.default_automaton {
            if let Err(e) = self.select(id) {
                tracing::warn!(%id, error = %e, "default automaton not available");
            }
        }
    }

    /// Convert state to persistent config
    pub fn to_persistent_config(&self) -> PersistentConfig {
        PersistentConfig {
            default_automaton: self
                .session
                .entry()
                .map(|e| e.id.to_string())
                .or_else(|| self.default_automaton.clone()),
            show_steps: Some(self.show_steps),
            dot_dir: self.dot_dir.clone(),
        }
    }

    /// Save current state to configuration file
    pub fn save_config(&self) -> Result<()> {
        self.to_persistent_config()
            .save_to(self.config_file_path.as_deref())
    }
}
