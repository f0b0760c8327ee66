//! CLI command implementations

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::commands::{
    describe_entry, list_entries, run_check, run_render, write_dot, CheckParams, CheckReport,
};
use crate::registry::{EntryDefinition, Registry};
use crate::simulation::Verdict;

use super::args::Commands;
use super::paths::{config_file_path, PersistentConfig};

/// Process exit code for anything that is not a verdict
pub const EXIT_FAILURE: i32 = 3;

/// Built-in registry plus the automata from `definitions`, if given.
pub fn load_registry(definitions: Option<&Path>) -> Result<Registry> {
    let mut registry = Registry::builtin().context("Built-in automata are invalid")?;
    if let Some(path) = definitions {
        registry
            .load_definitions(path)
            .with_context(|| format!("Failed to load definitions from {}", path.display()))?;
    }
    Ok(registry)
}

/// Execute a CLI command, returning the process exit code.
///
/// `check` exits 0 on acceptance, 1 on rejection and 2 on malformed input;
/// every other command exits 0 on success.
pub fn execute(
    command: Commands,
    definitions: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<i32> {
    match command {
        Commands::Repl { .. } => {
            // Handled in main.rs
            anyhow::bail!("The REPL is started by the binary, not by execute()")
        }
        Commands::List => {
            println!("{}", list_entries(&load_registry(definitions)?));
            Ok(0)
        }
        Commands::Show { id, json } => cmd_show(&load_registry(definitions)?, &id, json),
        Commands::Check {
            id,
            input,
            steps,
            dot,
        } => cmd_check(&load_registry(definitions)?, &id, input, steps, dot),
        Commands::Render { id, input, output } => {
            cmd_render(&load_registry(definitions)?, &id, input.as_deref(), output)
        }
        Commands::Settings {
            set_automaton,
            set_steps,
            set_dot_dir,
            reset,
        } => cmd_settings(
            config_path,
            definitions,
            set_automaton,
            set_steps,
            set_dot_dir,
            reset,
        ),
    }
}

/// Show command
fn cmd_show(registry: &Registry, id: &str, json: bool) -> Result<i32> {
    let entry = registry.select(id)?;
    if json {
        let definition = EntryDefinition::from(entry);
        println!("{}", serde_json::to_string_pretty(&definition)?);
    } else {
        println!("{}", describe_entry(entry));
    }
    Ok(0)
}

/// Check command
fn cmd_check(
    registry: &Registry,
    id: &str,
    input: String,
    steps: bool,
    dot: Option<PathBuf>,
) -> Result<i32> {
    let entry = registry.select(id)?;
    let params = CheckParams {
        input,
        show_steps: steps,
        dot_path: dot,
    };

    let report = run_check(entry, &params)?;
    print_report(&report);
    Ok(report.exit_code())
}

/// A check report with a coloured headline
pub fn format_report(report: &CheckReport) -> String {
    let headline = match report.simulation.verdict {
        Verdict::Accepted => report.headline.green().bold(),
        Verdict::Rejected => report.headline.red().bold(),
        _ => report.headline.yellow().bold(),
    };
    format!("{}\n{}", headline, report.body())
}

fn print_report(report: &CheckReport) {
    println!("{}", format_report(report));
}

/// Render command
fn cmd_render(
    registry: &Registry,
    id: &str,
    input: Option<&str>,
    output: Option<PathBuf>,
) -> Result<i32> {
    let entry = registry.select(id)?;
    let dot = run_render(entry, input);

    match output {
        Some(path) => {
            write_dot(&path, &dot)?;
            eprintln!("  Graph written to {}", path.display().to_string().cyan());
        }
        None => print!("{}", dot),
    }
    Ok(0)
}

/// Settings command
fn cmd_settings(
    config_path: Option<&Path>,
    definitions: Option<&Path>,
    set_automaton: Option<String>,
    set_steps: Option<bool>,
    set_dot_dir: Option<PathBuf>,
    reset: bool,
) -> Result<i32> {
    if reset {
        let config = PersistentConfig::default();
        config.save_to(config_path)?;
        println!("{}", "Configuration reset to defaults".green().bold());
        println!();
        print_config(&config, config_path);
        return Ok(0);
    }

    let mut config = PersistentConfig::load_from(config_path)?;
    let mut changed = false;

    if let Some(id) = set_automaton {
        // Reject typos before they reach the REPL.
        let registry = load_registry(definitions)?;
        let entry = registry.select(id.as_str())?;
        config.default_automaton = Some(entry.id.to_string());
        println!("  Set default automaton: {}", entry.id.to_string().green());
        changed = true;
    }

    if let Some(steps) = set_steps {
        config.show_steps = Some(steps);
        println!("  Set show steps: {}", steps.to_string().green());
        changed = true;
    }

    if let Some(dir) = set_dot_dir {
        println!(
            "  Set DOT output directory: {}",
            dir.display().to_string().cyan()
        );
        config.dot_dir = Some(dir);
        changed = true;
    }

    if changed {
        config.save_to(config_path)?;
        println!();
        println!("{}", "Configuration saved".green().bold());
    }

    println!();
    print_config(&config, config_path);

    Ok(0)
}

/// Print current configuration
fn print_config(config: &PersistentConfig, config_path: Option<&Path>) {
    println!("{}", "Current Configuration:".bold().underline());
    println!();

    let file = config_file_path(config_path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "(unknown)".to_string());
    println!("  Config File:       {}", file.cyan());

    let automaton = config.default_automaton.as_deref().unwrap_or("(none)");
    println!("  Default Automaton: {}", automaton.yellow());

    let steps = config.show_steps.unwrap_or(false);
    println!("  Show Steps:        {}", steps.to_string().yellow());

    let dot_dir = config
        .dot_dir
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(current directory)".to_string());
    println!("  DOT Directory:     {}", dot_dir.cyan());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_exit_codes() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(cmd_check(&registry, "a", "111000".into(), false, None).unwrap(), 0);
        assert_eq!(cmd_check(&registry, "a", "".into(), false, None).unwrap(), 1);
        assert_eq!(cmd_check(&registry, "b", "abc".into(), true, None).unwrap(), 2);
        assert!(cmd_check(&registry, "z", "1".into(), false, None).is_err());
    }

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a.dot");
        let registry = Registry::builtin().unwrap();

        assert_eq!(
            cmd_render(&registry, "A", Some("111000"), Some(out.clone())).unwrap(),
            0
        );
        let dot = std::fs::read_to_string(out).unwrap();
        assert!(dot.starts_with("digraph dfa {"));
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        cmd_settings(
            Some(&path),
            None,
            Some("B".to_string()),
            Some(true),
            None,
            false,
        )
        .unwrap();
        let saved = PersistentConfig::load_from(Some(&path)).unwrap();
        assert_eq!(saved.default_automaton.as_deref(), Some("b"));
        assert_eq!(saved.show_steps, Some(true));

        cmd_settings(Some(&path), None, None, None, None, true).unwrap();
        assert_eq!(
            PersistentConfig::load_from(Some(&path)).unwrap(),
            PersistentConfig::default()
        );
    }

    #[test]
    fn test_settings_rejects_unknown_automaton() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert!(cmd_settings(Some(&path), None, Some("zz".into()), None, None, false).is_err());
        assert!(!path.exists());
    }
}
