//! Plain-text tables: the step table of a run and the transition table of an
//! automaton.

use crate::automaton::Automaton;
use crate::simulation::Trace;

/// Lay out `rows` under `headers` in aligned columns separated by two spaces.
///
/// The first column is right-aligned, the rest left-aligned. Trailing spaces
/// are trimmed from every line.
pub fn aligned(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(headers[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(col, (cell, width))| {
                if col == 0 {
                    format!("{:>width$}", cell, width = width)
                } else {
                    format!("{:<width$}", cell, width = width)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    std::iter::once(format_row(headers.to_vec()))
        .chain(
            rows.iter()
                .map(|row| format_row(row.iter().map(String::as_str).collect())),
        )
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the transitions taken in `trace` as an aligned table.
///
/// ```text
/// step  state  symbol  next
///    1  0      1       1
///    2  1      1       3
/// ```
pub fn step_table(trace: &Trace) -> String {
    let rows: Vec<Vec<String>> = trace
        .steps()
        .map(|step| {
            vec![
                (step.index + 1).to_string(),
                step.from.to_string(),
                step.symbol.to_string(),
                step.to.to_string(),
            ]
        })
        .collect();

    if rows.is_empty() {
        return format!("(no input read; stayed in state {})", trace.last_state());
    }

    aligned(&["step", "state", "symbol", "next"], &rows)
}

/// Format the transition table of `automaton`, one row per state.
///
/// The initial state is prefixed with `->`, final states with `*`, and
/// missing transitions are shown as `-`.
pub fn transition_table(automaton: &Automaton) -> String {
    let symbols: Vec<String> = automaton
        .input_symbols()
        .iter()
        .map(char::to_string)
        .collect();

    let mut headers = vec!["state"];
    headers.extend(symbols.iter().map(String::as_str));

    let rows: Vec<Vec<String>> = automaton
        .states()
        .iter()
        .map(|state| {
            let marker = match (state == automaton.initial_state(), automaton.is_final(state)) {
                (true, true) => "->*",
                (true, false) => "->",
                (false, true) => "*",
                (false, false) => "",
            };

            std::iter::once(format!("{}{}", marker, state))
                .chain(automaton.input_symbols().iter().map(|symbol| {
                    automaton
                        .next_state(state, *symbol)
                        .map_or_else(|| "-".to_string(), ToString::to_string)
                }))
                .collect()
        })
        .collect();

    aligned(&headers, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::simulate;

    fn counter() -> Automaton {
        Automaton::builder()
            .states((0..12).map(|i| i.to_string()))
            .input_symbols(['+'])
            .transitions_from("0", [('+', "1")])
            .transitions_from("1", [('+', "10")])
            .transitions_from("10", [('+', "11")])
            .initial_state("0")
            .final_states(["11"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_step_table_layout() {
        let sim = simulate(&counter(), "+++");
        let table = step_table(&sim.trace);
        assert_eq!(
            table,
            "step  state  symbol  next\n   \
                1  0      +       1\n   \
                2  1      +       10\n   \
                3  10     +       11"
        );
    }

    #[test]
    fn test_step_table_empty_run() {
        let sim = simulate(&counter(), "");
        assert_eq!(step_table(&sim.trace), "(no input read; stayed in state 0)");
    }

    #[test]
    fn test_transition_table_markers() {
        let dfa = Automaton::builder()
            .states(["0", "1"])
            .input_symbols(['a', 'b'])
            .transition("0", 'a', "1")
            .transitions_from("1", [('a', "1"), ('b', "0")])
            .initial_state("0")
            .final_states(["1"])
            .build()
            .unwrap();

        assert_eq!(
            transition_table(&dfa),
            "state  a  b\n  \
                ->0  1  -\n   \
                *1  1  0"
        );
    }
}
