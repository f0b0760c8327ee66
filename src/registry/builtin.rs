//! The two built-in automata.
//!
//! Both tables are kept exactly as they were first written down, including
//! the repeated keys on state `3` of automaton B. That row lists `a` and `b`
//! twice (`a: 3, b: 3, a: 4, b: 7`); it is built with
//! [`DuplicatePolicy::LastWriteWins`] so the later entries, `3 -a-> 4` and
//! `3 -b-> 7`, are the ones in effect.

use super::{Entry, Production};
use crate::automaton::{Automaton, AutomatonError, DuplicatePolicy};
use std::sync::Arc;

/// Regular expression recognised by automaton A.
pub const REGEX_A: &str = "(1+0)(1+0)*(11+00)(11+00)* (1+0)(0+1)(11*00*)((00)*+(11)*)(11+00)(11+00)*(1+0)*";

/// Regular expression recognised by automaton B.
pub const REGEX_B: &str = "(aa+bb)(a+b)*(aba+bab+bbb+aaa)(ab+ba)*(bb+aa)(a+b)*(a*ba*ba*)(bab+bba+bbb+aba)(a+b)*";

const TABLE_A: &[(&str, &[(char, &str)])] = &[
    ("0", &[('0', "1"), ('1', "1")]),
    ("1", &[('0', "2"), ('1', "3")]),
    ("2", &[('0', "4"), ('1', "8")]),
    ("3", &[('0', "8"), ('1', "4")]),
    ("4", &[('0', "5"), ('1', "5")]),
    ("5", &[('0', "6"), ('1', "6")]),
    ("6", &[('0', "7"), ('1', "7")]),
    ("7", &[('0', "7"), ('1', "7")]),
    ("8", &[('0', "8"), ('1', "8")]),
];

const TABLE_B: &[(&str, &[(char, &str)])] = &[
    ("0", &[('a', "1"), ('b', "2")]),
    ("1", &[('a', "3"), ('b', "11")]),
    ("2", &[('b', "3"), ('a', "11")]),
    ("3", &[('a', "3"), ('b', "3"), ('a', "4"), ('b', "7")]),
    ("4", &[('a', "8"), ('b', "5")]),
    ("5", &[('a', "9"), ('b', "12")]),
    ("7", &[('a', "12"), ('b', "6")]),
    ("6", &[('a', "12"), ('b', "9")]),
    ("8", &[('a', "9"), ('b', "12")]),
    ("9", &[('a', "13"), ('b', "10")]),
    ("13", &[('b', "9"), ('a', "12")]),
    ("10", &[('a', "11"), ('b', "12")]),
    ("11", &[('a', "11"), ('b', "11")]),
    ("12", &[('a', "12"), ('b', "12")]),
];

const GRAMMAR_A: &[(&str, &[&str])] = &[
    ("S", &["ABCDAAEHCDB"]),
    ("A", &["1", "0"]),
    ("B", &["1A", "0A", "λ"]),
    ("C", &["11", "00"]),
    ("D", &["11D", "00D", "λ"]),
    ("E", &["1F0G"]),
    ("F", &["1F", "λ"]),
    ("G", &["0G", "λ"]),
    ("H", &["I", "J"]),
    ("I", &["00I", "λ"]),
    ("J", &["11J", "λ"]),
];

const GRAMMAR_B: &[(&str, &[&str])] = &[
    ("S", &["ABCDABEGB"]),
    ("A", &["aa", "bb"]),
    ("B", &["aB", "bB", "λ"]),
    ("C", &["aba", "bab", "bbb", "aaa"]),
    ("D", &["abD", "baD", "λ"]),
    ("E", &["FbFbFb"]),
    ("F", &["aF", "λ"]),
    ("G", &["bab", "bba", "bbb", "aba"]),
];

/// Build a table-driven automaton over states `0..state_count`.
fn from_table(
    state_count: usize,
    symbols: [char; 2],
    table: &[(&str, &[(char, &str)])],
    final_state: &str,
    policy: DuplicatePolicy,
) -> Result<Automaton, AutomatonError> {
    table
        .iter()
        .fold(
            Automaton::builder()
                .states((0..state_count).map(|i| i.to_string()))
                .input_symbols(symbols)
                .initial_state("0")
                .final_states([final_state])
                .duplicate_policy(policy),
            |builder, (from, targets)| builder.transitions_from(*from, targets.iter().copied()),
        )
        .build()
}

fn grammar(rules: &[(&str, &[&str])]) -> Vec<Production> {
    rules
        .iter()
        .map(|(head, bodies)| Production::new(*head, bodies.iter().copied()))
        .collect()
}

/// Automaton A: nine states over `{0, 1}`, final state `7`, trap state `8`.
pub fn automaton_a() -> Result<Automaton, AutomatonError> {
    from_table(9, ['0', '1'], TABLE_A, "7", DuplicatePolicy::Reject)
}

/// Automaton B: fourteen states over `{a, b}`, final state `12`.
pub fn automaton_b() -> Result<Automaton, AutomatonError> {
    automaton_b_with(DuplicatePolicy::LastWriteWins)
}

/// Automaton B's literal table built under an explicit duplicate policy.
pub fn automaton_b_with(policy: DuplicatePolicy) -> Result<Automaton, AutomatonError> {
    from_table(14, ['a', 'b'], TABLE_B, "12", policy)
}

/// Registry entry for automaton A.
pub fn entry_a() -> Result<Entry, AutomatonError> {
    Ok(Entry {
        id: "a".into(),
        title: "RegEx 1 over {0, 1}".to_string(),
        regex: Some(REGEX_A.to_string()),
        grammar: grammar(GRAMMAR_A),
        automaton: Arc::new(automaton_a()?),
    })
}

/// Registry entry for automaton B.
pub fn entry_b() -> Result<Entry, AutomatonError> {
    Ok(Entry {
        id: "b".into(),
        title: "RegEx 2 over {a, b}".to_string(),
        regex: Some(REGEX_B.to_string()),
        grammar: grammar(GRAMMAR_B),
        automaton: Arc::new(automaton_b()?),
    })
}
