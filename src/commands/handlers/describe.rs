//! Shared describe/list handlers

use crate::automaton::{Automaton, StateId};
use crate::registry::{Entry, Registry};
use crate::render::table::{aligned, transition_table};

/// Alphabet as a set literal, e.g. `{0, 1}`.
pub fn format_alphabet(automaton: &Automaton) -> String {
    let symbols = automaton
        .input_symbols()
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>();
    format!("{{{}}}", symbols.join(", "))
}

fn join_states<'a>(states: impl IntoIterator<Item = &'a StateId>) -> String {
    let joined = states
        .into_iter()
        .map(StateId::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined
    }
}

/// One line per registered automaton: id, title, state count, alphabet.
pub fn list_entries(registry: &Registry) -> String {
    if registry.is_empty() {
        return "No automata registered".to_string();
    }

    let rows: Vec<Vec<String>> = registry
        .entries()
        .map(|entry| {
            vec![
                entry.id.to_string(),
                entry.title.clone(),
                entry.automaton.states().len().to_string(),
                format_alphabet(&entry.automaton),
            ]
        })
        .collect();

    aligned(&["id", "title", "states", "alphabet"], &rows)
}

/// Full description of an entry: texts, components and transition table.
pub fn describe_entry(entry: &Entry) -> String {
    let automaton = &entry.automaton;
    let mut lines = vec![format!("{}: {}", entry.id, entry.title), String::new()];

    if let Some(regex) = &entry.regex {
        lines.push("Regular expression:".to_string());
        lines.push(format!("  {}", regex));
        lines.push(String::new());
    }

    if !entry.grammar.is_empty() {
        lines.push("Grammar:".to_string());
        lines.extend(entry.grammar.iter().map(|p| format!("  {}", p)));
        lines.push(String::new());
    }

    lines.push(format!("States:   {}", join_states(automaton.states())));
    lines.push(format!("Alphabet: {}", format_alphabet(automaton)));
    lines.push(format!("Initial:  {}", automaton.initial_state()));
    lines.push(format!("Final:    {}", join_states(automaton.final_states())));
    lines.push(format!("Dead:     {}", join_states(automaton.dead_states())));

    if !automaton.overridden().is_empty() {
        lines.push(String::new());
        lines.push("Overridden transitions:".to_string());
        lines.extend(automaton.overridden().iter().map(|o| {
            format!(
                "  {state} -{symbol}-> {discarded} replaced by {state} -{symbol}-> {kept}",
                state = o.state,
                symbol = o.symbol,
                discarded = o.discarded,
                kept = o.kept
            )
        }));
    }

    lines.push(String::new());
    lines.push("Transitions:".to_string());
    lines.extend(transition_table(automaton).lines().map(|l| format!("  {}", l)));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_entries() {
        let registry = Registry::builtin().unwrap();
        let listing = list_entries(&registry);
        let lines: Vec<&str> = listing.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("id  title                states  alphabet"));
        assert!(lines[1].contains("RegEx 1 over {0, 1}  9"));
        assert!(lines[2].ends_with("14      {a, b}"));
    }

    #[test]
    fn test_list_empty_registry() {
        assert_eq!(list_entries(&Registry::new()), "No automata registered");
    }

    #[test]
    fn test_describe_builtin_b() {
        let registry = Registry::builtin().unwrap();
        let text = describe_entry(registry.select("b").unwrap());

        assert!(text.starts_with("b: RegEx 2 over {a, b}\n"));
        assert!(text.contains("  S -> ABCDABEGB"));
        assert!(text.contains("Final:    12"));
        assert!(text.contains("Dead:     11"));
        assert!(text.contains("  3 -a-> 3 replaced by 3 -a-> 4"));
        assert!(text.contains("  3 -b-> 3 replaced by 3 -b-> 7"));
        assert!(text.contains("    ->0  1   2"));
    }

    #[test]
    fn test_format_alphabet() {
        let registry = Registry::builtin().unwrap();
        assert_eq!(format_alphabet(&registry.select("a").unwrap().automaton), "{0, 1}");
    }
}
