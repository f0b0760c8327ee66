//! Shared check command handler

use super::describe::format_alphabet;
use super::render::write_dot;
use crate::commands::core::{CheckParams, CheckReport, CommandError};
use crate::registry::Entry;
use crate::render::{step_table, to_dot};
use crate::simulation::{Simulation, Verdict};

/// Check a string against an entry's automaton
///
/// This is the check logic shared by both CLI and REPL: simulate, optionally
/// write the highlighted graph, and phrase the verdict.
///
/// # Errors
///
/// Only when `params.dot_path` is set and the file cannot be written. A
/// rejected or malformed input is a normal report, not an error.
pub fn run_check(entry: &Entry, params: &CheckParams) -> Result<CheckReport, CommandError> {
    let simulation = entry.check(&params.input);

    let dot_path = match &params.dot_path {
        Some(path) => {
            write_dot(path, &to_dot(&entry.automaton, Some(&simulation)))?;
            Some(path.clone())
        }
        None => None,
    };

    tracing::info!(
        automaton = %entry.id,
        input = %params.input,
        verdict = simulation.verdict.label(),
        "checked string"
    );

    Ok(CheckReport {
        headline: headline(&simulation.verdict),
        message: verdict_message(entry, &simulation),
        path: format_path(&simulation),
        steps: params.show_steps.then(|| step_table(&simulation.trace)),
        dot_path,
        simulation,
    })
}

/// `VALID` for accepted input, `INVALID` for rejected, `MALFORMED` otherwise.
pub fn headline(verdict: &Verdict) -> &'static str {
    match verdict {
        Verdict::Accepted => "VALID",
        Verdict::Rejected => "INVALID",
        Verdict::InvalidSymbol { .. } | Verdict::UndefinedTransition { .. } => "MALFORMED",
    }
}

/// Explain the verdict in one sentence
pub fn verdict_message(entry: &Entry, simulation: &Simulation) -> String {
    let input = simulation.trace.input();
    let last = simulation.trace.last_state();

    match &simulation.verdict {
        Verdict::Accepted => format!(
            "'{}' is accepted by automaton {} (ended in final state {})",
            input, entry.id, last
        ),
        Verdict::Rejected => format!(
            "'{}' is rejected by automaton {} (ended in state {}, which is not final)",
            input, entry.id, last
        ),
        Verdict::InvalidSymbol {
            symbol, position, ..
        } => format!(
            "invalid symbol '{}' at position {} (alphabet is {})",
            symbol,
            position,
            format_alphabet(&entry.automaton)
        ),
        Verdict::UndefinedTransition {
            symbol,
            position,
            state,
        } => format!(
            "no transition from state {} on '{}' (position {})",
            state, symbol, position
        ),
    }
}

/// Visited states joined by arrows, e.g. `0 -> 1 -> 3`.
pub fn format_path(simulation: &Simulation) -> String {
    simulation
        .trace
        .states()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
