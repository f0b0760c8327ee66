//! Graphviz output.
//!
//! Converts an automaton to the [dot](https://graphviz.org/docs/layouts/dot/)
//! language. When a simulation is given, the visited states and the edges that
//! were taken are highlighted and the state the run ended in is filled green
//! (accepted) or red (anything else).

use crate::automaton::{Automaton, Edge, StateId};
use crate::simulation::Simulation;
use std::collections::{BTreeMap, BTreeSet};

const START_NODE: &str = "__start";
const VISITED_FILL: &str = "#dbe9f6";
const ACCEPT_FILL: &str = "#b7e1a1";
const REJECT_FILL: &str = "#f4b6b6";
const PATH_COLOR: &str = "#1f77b4";

struct Highlight<'a> {
    visited: BTreeSet<&'a StateId>,
    taken: BTreeSet<(&'a StateId, &'a StateId)>,
    last: &'a StateId,
    accepted: bool,
}

impl<'a> Highlight<'a> {
    fn new(simulation: &'a Simulation) -> Self {
        let trace = &simulation.trace;
        Self {
            visited: trace.states().iter().collect(),
            taken: trace.steps().map(|step| (step.from, step.to)).collect(),
            last: trace.last_state(),
            accepted: simulation.is_accepted(),
        }
    }
}

/// Render `automaton` as a dot digraph, optionally highlighting a run.
///
/// Parallel edges between the same two states are merged into one edge with
/// a comma-separated label. Output is sorted and therefore stable.
pub fn to_dot(automaton: &Automaton, simulation: Option<&Simulation>) -> String {
    let highlight = simulation.map(Highlight::new);
    let dead = automaton.dead_states();

    let mut lines = Vec::new();

    if let Some(simulation) = simulation {
        lines.push(format!(
            "label = {};",
            quote(&format!(
                "\"{}\" {}",
                simulation.trace.input(),
                simulation.verdict.label()
            ))
        ));
        lines.push("labelloc = b;".to_string());
        lines.push(String::new());
    }

    lines.push(format!(
        "{} [label = \"\", shape = none, width = 0, height = 0];",
        START_NODE
    ));
    lines.extend(
        automaton
            .states()
            .iter()
            .map(|state| node_dot(automaton, state, highlight.as_ref(), dead.contains(state))),
    );
    lines.push(String::new());

    lines.push(format!(
        "{} -> {};",
        START_NODE,
        quote(automaton.initial_state().as_str())
    ));
    lines.extend(
        merged_edges(automaton)
            .into_iter()
            .map(|((from, to), symbols)| edge_dot(from, to, &symbols, highlight.as_ref())),
    );

    format!(
        "digraph dfa {{\n\
            \trankdir = LR;\n\
            \n\
            {}\n\
        }}\n",
        lines
            .iter()
            .map(|l| if l.is_empty() { String::new() } else { format!("\t{}", l) })
            .collect::<Vec<_>>()
            .join("\n")
    )
}

fn node_dot(
    automaton: &Automaton,
    state: &StateId,
    highlight: Option<&Highlight<'_>>,
    dead: bool,
) -> String {
    let mut attrs = vec![format!(
        "shape = {}",
        if automaton.is_final(state) {
            "doublecircle"
        } else {
            "circle"
        }
    )];

    match highlight {
        Some(h) if h.last == state => {
            let fill = if h.accepted { ACCEPT_FILL } else { REJECT_FILL };
            attrs.push(format!("style = filled, fillcolor = \"{}\", penwidth = 2", fill));
        }
        Some(h) if h.visited.contains(state) => {
            attrs.push(format!(
                "style = filled, fillcolor = \"{}\", penwidth = 2",
                VISITED_FILL
            ));
        }
        _ if dead => attrs.push("style = dashed".to_string()),
        _ => {}
    }

    format!("{} [{}];", quote(state.as_str()), attrs.join(", "))
}

fn edge_dot(
    from: &StateId,
    to: &StateId,
    symbols: &[char],
    highlight: Option<&Highlight<'_>>,
) -> String {
    let label = symbols
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut attrs = vec![format!("label = {}", quote(&label))];
    if highlight.is_some_and(|h| h.taken.contains(&(from, to))) {
        attrs.push(format!(
            "color = \"{0}\", fontcolor = \"{0}\", penwidth = 2.5",
            PATH_COLOR
        ));
    }

    format!(
        "{} -> {} [{}];",
        quote(from.as_str()),
        quote(to.as_str()),
        attrs.join(", ")
    )
}

/// Group transitions by `(from, to)`, collecting their symbols.
fn merged_edges(automaton: &Automaton) -> BTreeMap<(&StateId, &StateId), Vec<char>> {
    let mut merged: BTreeMap<(&StateId, &StateId), Vec<char>> = BTreeMap::new();
    for Edge { from, symbol, to } in automaton.edges() {
        merged.entry((from, to)).or_default().push(symbol);
    }
    merged
}

/// Quote an id or label as a dot string.
fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::simulate;

    fn toggle() -> Automaton {
        Automaton::builder()
            .states(["off", "on", "stuck"])
            .input_symbols(['t', 'x'])
            .transitions_from("off", [('t', "on"), ('x', "stuck")])
            .transitions_from("on", [('t', "off"), ('x', "stuck")])
            .transitions_from("stuck", [('t', "stuck"), ('x', "stuck")])
            .initial_state("off")
            .final_states(["on"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_plain_graph() {
        let dot = to_dot(&toggle(), None);

        assert!(dot.starts_with("digraph dfa {\n\trankdir = LR;\n"));
        assert!(dot.contains("\t\"on\" [shape = doublecircle];"));
        assert!(dot.contains("\t\"off\" [shape = circle];"));
        assert!(dot.contains("\t__start -> \"off\";"));
        assert!(dot.contains("\t\"stuck\" -> \"stuck\" [label = \"t, x\"];"));
        assert!(dot.contains("\"stuck\" [shape = circle, style = dashed];"));
        assert!(!dot.contains(PATH_COLOR));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn test_highlight_accepted_path() {
        let dfa = toggle();
        let sim = simulate(&dfa, "ttt");
        let dot = to_dot(&dfa, Some(&sim));

        assert!(dot.contains("label = \"\\\"ttt\\\" accepted\";"));
        assert!(dot.contains(&format!(
            "\"off\" -> \"on\" [label = \"t\", color = \"{0}\", fontcolor = \"{0}\", penwidth = 2.5];",
            PATH_COLOR
        )));
        assert!(dot.contains(&format!("\"on\" [shape = doublecircle, style = filled, fillcolor = \"{}\"", ACCEPT_FILL)));
        assert!(dot.contains(&format!("\"off\" [shape = circle, style = filled, fillcolor = \"{}\"", VISITED_FILL)));
        assert!(dot.contains("\"off\" -> \"stuck\" [label = \"x\"];"));
    }

    #[test]
    fn test_highlight_rejected_run() {
        let dfa = toggle();
        let sim = simulate(&dfa, "tx");
        let dot = to_dot(&dfa, Some(&sim));
        assert!(dot.contains(&format!("\"stuck\" [shape = circle, style = filled, fillcolor = \"{}\"", REJECT_FILL)));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
    }

    #[test]
    fn test_output_is_stable() {
        let dfa = toggle();
        assert_eq!(to_dot(&dfa, None), to_dot(&dfa, None));
    }
}
