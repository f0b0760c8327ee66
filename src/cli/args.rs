//! CLI argument definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "libdfa")]
#[command(about = "Check strings against deterministic finite automata")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// JSON file with extra automaton definitions
    #[arg(long, global = true)]
    pub definitions: Option<PathBuf>,

    /// Custom configuration file path
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered automata
    List,

    /// Show an automaton's regex, grammar and transition table
    Show {
        /// Automaton id
        id: String,

        /// Print the definition as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Check whether an automaton accepts a string
    Check {
        /// Automaton id
        id: String,

        /// String to test (may be empty)
        #[arg(default_value = "", allow_hyphen_values = true)]
        input: String,

        /// Print the step table
        #[arg(short, long)]
        steps: bool,

        /// Write the highlighted graph to this DOT file
        #[arg(long)]
        dot: Option<PathBuf>,
    },

    /// Print an automaton as Graphviz DOT
    Render {
        /// Automaton id
        id: String,

        /// Highlight the run on this string
        input: Option<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Launch interactive REPL
    Repl {
        /// Automaton to select at startup
        #[arg(short, long)]
        automaton: Option<String>,

        /// Show the step table after every check
        #[arg(short, long)]
        steps: bool,
    },

    /// Show or update user settings
    Settings {
        /// Set the automaton the REPL starts with
        #[arg(long)]
        set_automaton: Option<String>,

        /// Set whether checks show the step table
        #[arg(long)]
        set_steps: Option<bool>,

        /// Set the directory REPL `render` writes into
        #[arg(long)]
        set_dot_dir: Option<PathBuf>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}
