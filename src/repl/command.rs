//! Command parsing and execution
//!
//! Defines all REPL commands and their execution logic.

use super::state::{ReplState, SessionState};
use crate::cli::commands::format_report;
use crate::commands::{describe_entry, list_entries, CommandResult};
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Select an automaton: use <id>
    Use {
        /// Automaton id
        id: String,
    },
    /// Test a string: check <string>
    Check {
        /// Everything after the command word, trimmed
        input: String,
    },
    /// Describe the selected automaton: show
    Show,
    /// List registered automata: list
    List,
    /// Write the graph of the selected automaton: render [path]
    Render {
        /// Output file (defaults to `<id>.dot` in the DOT directory)
        path: Option<PathBuf>,
    },
    /// Toggle the step table: steps [on|off]
    Steps {
        /// Enable or disable; toggles when absent
        enable: Option<bool>,
    },
    /// Load extra definitions: load <file.json>
    Load {
        /// Definitions file
        path: PathBuf,
    },
    /// Show settings: settings
    Settings,
    /// Show help: help [command]
    Help {
        /// Help topic
        topic: Option<String>,
    },
    /// Exit REPL: exit | quit
    Exit,
}

impl Command {
    /// Parse command from input string
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        if input.is_empty() {
            return Err(anyhow::anyhow!("Empty command"));
        }

        let (cmd, rest) = match input.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (input, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        match cmd.to_lowercase().as_str() {
            "use" | "select" => Self::parse_use(&args),
            "check" | "test" | "c" => Ok(Self::Check {
                input: rest.to_string(),
            }),
            "show" | "info" => Ok(Self::Show),
            "list" | "ls" => Ok(Self::List),
            "render" | "dot" => Self::parse_render(&args),
            "steps" => Self::parse_steps(&args),
            "load" => Self::parse_load(&args),
            "settings" | "set" => Ok(Self::Settings),
            "help" | "?" => Self::parse_help(&args),
            "exit" | "quit" => Ok(Self::Exit),
            other => Err(anyhow::anyhow!(
                "Unknown command: '{}'. Type 'help' for available commands.",
                other
            )),
        }
    }

    fn parse_use(args: &[&str]) -> Result<Self> {
        match args {
            [id] => Ok(Self::Use { id: id.to_string() }),
            _ => Err(anyhow::anyhow!("Usage: use <id>")),
        }
    }

    fn parse_render(args: &[&str]) -> Result<Self> {
        match args {
            [] => Ok(Self::Render { path: None }),
            [path] => Ok(Self::Render {
                path: Some(PathBuf::from(path)),
            }),
            _ => Err(anyhow::anyhow!("Usage: render [path]")),
        }
    }

    fn parse_steps(args: &[&str]) -> Result<Self> {
        let enable = if args.is_empty() {
            None
        } else {
            Some(match args[0].to_lowercase().as_str() {
                "on" | "true" | "yes" | "1" => true,
                "off" | "false" | "no" | "0" => false,
                _ => return Err(anyhow::anyhow!("Usage: steps [on|off]")),
            })
        };
        Ok(Self::Steps { enable })
    }

    fn parse_load(args: &[&str]) -> Result<Self> {
        match args {
            [path] => Ok(Self::Load {
                path: PathBuf::from(path),
            }),
            _ => Err(anyhow::anyhow!("Usage: load <file.json>")),
        }
    }

    fn parse_help(args: &[&str]) -> Result<Self> {
        Ok(Self::Help {
            topic: args.first().map(|s| s.to_string()),
        })
    }

    /// Execute the command against the REPL state
    pub fn execute(&self, state: &mut ReplState) -> Result<CommandResult> {
        match self {
            Self::Use { id } => {
                let entry = state.select(id)?;
                let output = format!(
                    "Using automaton {}: {}",
                    entry.id.to_string().green().bold(),
                    entry.title
                );
                Ok(CommandResult::settings_changed(output))
            }

            Self::Check { input } if input.is_empty() => Ok(CommandResult::success(
                "You need to enter a string!".yellow().to_string(),
            )),

            Self::Check { input } => {
                let report = state.check(input)?;
                Ok(CommandResult::success(format_report(&report)))
            }

            Self::Show => Ok(CommandResult::success(describe_entry(state.entry()?))),

            Self::List => {
                let selected = state.session.entry().map(|e| e.id.clone());
                let mut output = list_entries(&state.registry);
                if let Some(id) = selected {
                    output.push_str(&format!("\n\nSelected: {}", id.to_string().green()));
                }
                Ok(CommandResult::success(output))
            }

            Self::Render { path } => {
                let written = state.render(path.as_deref())?;
                let what = if state.session.last_run().is_some() {
                    "Graph with last run"
                } else {
                    "Graph"
                };
                Ok(CommandResult::success(format!(
                    "{} written to {}",
                    what,
                    written.display().to_string().cyan()
                )))
            }

            Self::Steps { enable } => {
                state.show_steps = enable.unwrap_or(!state.show_steps);
                let status = if state.show_steps {
                    "on".green()
                } else {
                    "off".red()
                };
                Ok(CommandResult::settings_changed(format!(
                    "Step table: {}",
                    status
                )))
            }

            Self::Load { path } => {
                let ids = state.load_definitions(path)?;
                let names = ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(CommandResult::success(format!(
                    "Loaded {} automaton(s): {}",
                    ids.len().to_string().green().bold(),
                    names
                )))
            }

            Self::Settings => Ok(CommandResult::success(Self::format_settings(state))),

            Self::Help { topic } => Ok(CommandResult::success(match topic {
                Some(topic) => Self::command_help(topic),
                None => Self::general_help(),
            })),

            Self::Exit => Ok(CommandResult::exit("Goodbye!".green().to_string())),
        }
    }

    fn format_settings(state: &ReplState) -> String {
        let session = match &state.session {
            SessionState::Uninitialized => "no automaton selected".to_string(),
            SessionState::Ready { entry, last_run } => match last_run {
                Some(run) => format!("{} (last check: {})", entry.id, run.verdict.label()),
                None => entry.id.to_string(),
            },
            SessionState::Error { reason } => format!("error: {}", reason),
        };
        let dot_dir = state
            .dot_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(current directory)".to_string());

        format!(
            "{}\n\n  Automaton:     {}\n  Step table:    {}\n  DOT directory: {}",
            "Current Settings:".bold().underline(),
            session.yellow(),
            if state.show_steps { "on" } else { "off" },
            dot_dir.cyan()
        )
    }

    fn general_help() -> String {
        format!(
            r#"{}

{}
  use, select <id>          Select an automaton (a or b, or a loaded one)
  check, test, c <string>   Test a string against the selected automaton
  show, info                Regex, grammar and transition table
  list, ls                  List available automata

{}
  render, dot [path]        Write the graph (with the last run highlighted)
  load <file.json>          Load more automata from a definitions file

{}
  steps [on|off]            Toggle the step table after each check
  settings, set             Show current settings

{}
  help, ? [command]         Show this help or help for specific command
  exit, quit                Exit REPL

{}
  libdfa> use a
  libdfa> check 111000
  libdfa> steps on
  libdfa> check 1010101011
  libdfa> render run.dot

A line ending in '\' continues on the next line.
For detailed help on a command, type: help <command>
"#,
            "libdfa REPL - Interactive DFA Explorer".bold().underline(),
            "Automata:".bold(),
            "Output:".bold(),
            "Configuration:".bold(),
            "Utility:".bold(),
            "Examples:".bold(),
        )
    }

    fn command_help(topic: &str) -> String {
        match topic.to_lowercase().as_str() {
            "use" | "select" => format!(
                r#"{}

{}
  use <id>

{}
  Select the automaton that check, show and render work on. Ids are
  case-insensitive. Selecting clears the previous run and any error.
"#,
                "use - Select Automaton".bold().underline(),
                "Usage:".bold(),
                "Description:".bold(),
            ),
            "check" | "test" | "c" => format!(
                r#"{}

{}
  check <string>
  c <string>

{}
  Run the string through the selected automaton and print the verdict:
  VALID (accepted), INVALID (rejected) or MALFORMED (a symbol outside the
  alphabet, or no transition for it). The visited states are listed, and
  the step table too when 'steps' is on.

{}
  check 111000      # accepted by automaton a
  check aaabb       # accepted by automaton b
  check abc         # malformed: 'c' is not in b's alphabet
"#,
                "check - Test a String".bold().underline(),
                "Usage:".bold(),
                "Description:".bold(),
                "Examples:".bold(),
            ),
            "render" | "dot" => format!(
                r#"{}

{}
  render [path]

{}
  Write the selected automaton as Graphviz DOT. After a check the visited
  states and taken edges are highlighted and the final state is coloured
  by the verdict. Without a path the file is <id>.dot in the configured
  DOT directory. Convert it with: dot -Tsvg <file> -o graph.svg
"#,
                "render - Write Graph".bold().underline(),
                "Usage:".bold(),
                "Description:".bold(),
            ),
            "steps" => format!(
                r#"{}

{}
  steps [on|off]

{}
  Show or hide the step table (step, state, symbol, next state) after
  each check. Without an argument the setting is toggled.
"#,
                "steps - Step Table".bold().underline(),
                "Usage:".bold(),
                "Description:".bold(),
            ),
            "load" => format!(
                r#"{}

{}
  load <file.json>

{}
  Register the automata in a JSON definitions file (one object or an
  array). Nothing is registered unless every definition is valid; on
  failure the session enters the error state until the next 'use'.
"#,
                "load - Load Definitions".bold().underline(),
                "Usage:".bold(),
                "Description:".bold(),
            ),
            _ => format!(
                "No detailed help for '{}'. Type 'help' for all commands.",
                topic
            ),
        }
    }
}
