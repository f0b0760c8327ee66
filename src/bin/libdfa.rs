//! libdfa - Check strings against deterministic finite automata
//!
//! Provides one-shot CLI commands and an interactive REPL.

use clap::Parser;
use colored::Colorize;
use std::path::Path;
use std::process;

use libdfa::cli::commands::{self, EXIT_FAILURE};
use libdfa::cli::paths::PersistentConfig;
use libdfa::cli::{Cli, Commands};
use libdfa::registry::Registry;
use libdfa::repl::{self, Action, Command, DfaHelper, ReplEvent, ReplState, ReplStateMachine};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

fn main() {
    let cli = Cli::parse();
    libdfa::logging::init(cli.verbose);

    let definitions = cli.definitions.as_deref();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Repl { automaton, steps } => {
            run_repl(definitions, config, automaton, steps).map(|()| 0)
        }
        command => commands::execute(command, definitions, config),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            process::exit(EXIT_FAILURE);
        }
    }
}

fn run_repl(
    definitions: Option<&Path>,
    config_path: Option<&Path>,
    automaton: Option<String>,
    steps: bool,
) -> anyhow::Result<()> {
    let mut state = start_session(definitions, config_path, automaton, steps)?;

    let rustyline_config = Config::builder()
        .auto_add_history(true)
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .max_history_size(repl::MAX_HISTORY)?
        .build();
    let mut editor: Editor<DfaHelper, DefaultHistory> = Editor::with_config(rustyline_config)?;
    editor.set_helper(Some(DfaHelper::new(automaton_ids(&state))));

    let history = repl::history_path();
    if let Some(path) = history.as_deref().filter(|p| p.exists()) {
        if let Err(e) = editor.load_history(path) {
            tracing::debug!(path = %path.display(), error = %e, "history not loaded");
        }
    }

    let mut machine = ReplStateMachine::new();
    while !machine.is_terminal() {
        let event = match editor.readline(&prompt(&machine, &state)) {
            Ok(line) => ReplEvent::Line(line.trim().to_string()),
            Err(ReadlineError::Interrupted) => ReplEvent::Interrupted,
            Err(ReadlineError::Eof) => ReplEvent::Eof,
            Err(err) => {
                eprintln!("{}: {:?}", "Readline error".red().bold(), err);
                break;
            }
        };

        let output = match machine.on_input(event) {
            Action::Show(output) => output,
            Action::Run(command) => {
                let result = command.execute(&mut state);
                if let Ok(done) = &result {
                    if done.settings_changed {
                        save_config(&state);
                    }
                    if matches!(command, Command::Load { .. }) {
                        if let Some(helper) = editor.helper_mut() {
                            helper.set_automata(automaton_ids(&state));
                        }
                    }
                }
                machine.on_result(result)
            }
        };
        if let Some(output) = output {
            println!("{}", output);
        }
    }

    if let Some(path) = &history {
        if let Err(e) = editor.save_history(path) {
            eprintln!("{}: Failed to save history: {}", "Warning".yellow(), e);
        }
    }
    save_config(&state);

    Ok(())
}

/// Build the session: stored settings under the command-line ones, plus any
/// extra definitions.
fn start_session(
    definitions: Option<&Path>,
    config_path: Option<&Path>,
    automaton: Option<String>,
    steps: bool,
) -> anyhow::Result<ReplState> {
    let stored = PersistentConfig::load_from(config_path).unwrap_or_else(|e| {
        eprintln!("  {}: {:#}", "Warning".yellow(), e);
        PersistentConfig::default()
    });
    let config = stored.merge_with_cli(&PersistentConfig {
        default_automaton: automaton,
        show_steps: steps.then_some(true),
        dot_dir: None,
    });

    print_banner();

    let mut state = ReplState::new(Registry::builtin()?);
    state.config_file_path = config_path.map(Path::to_path_buf);

    if let Some(path) = definitions {
        match state.load_definitions(path) {
            Ok(ids) => println!(
                "  Loaded {} automaton(s) from {}",
                ids.len().to_string().green().bold(),
                path.display().to_string().cyan()
            ),
            Err(e) => eprintln!("  {}: {:#}", "Warning".yellow(), e),
        }
    }

    state.apply_config(&config);
    if let Some(entry) = state.session.entry() {
        println!(
            "  Using automaton {}: {}",
            entry.id.to_string().green().bold(),
            entry.title
        );
    }
    println!();

    Ok(state)
}

fn automaton_ids(state: &ReplState) -> Vec<String> {
    state.registry.ids().map(ToString::to_string).collect()
}

/// `libdfa [a✓]> `, or the continuation prompt mid-line
fn prompt(machine: &ReplStateMachine, state: &ReplState) -> String {
    let name = repl::PROMPT_NAME.bright_cyan().bold();
    if machine.is_continuing() {
        format!("{} {}", name, repl::CONTINUATION_PROMPT)
    } else {
        format!("{} [{}]> ", name, state.session.prompt_context())
    }
}

fn save_config(state: &ReplState) {
    if let Err(e) = state.save_config() {
        eprintln!("{}: Failed to save config: {:#}", "Warning".yellow(), e);
    }
}

fn print_banner() {
    let rule = "─".repeat(52);
    println!();
    println!("{}", rule.bright_cyan());
    println!(
        "  {} {}",
        "libdfa".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").green()
    );
    println!("  Deterministic finite automata, one string at a time");
    println!("{}", rule.bright_cyan());
    println!();
    println!(
        "  {} select an automaton ({}), {} test a string, {} write the graph",
        "use".cyan(),
        "a, b".yellow(),
        "check".cyan(),
        "render".cyan()
    );
    println!(
        "  {} lists every command; {} or Ctrl+D leaves",
        "help".yellow().bold(),
        "exit".yellow().bold()
    );
    println!();
}
