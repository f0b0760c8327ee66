//! Deterministic finite automaton model.
//!
//! An [`Automaton`] is an immutable five-tuple of states, input symbols,
//! transition table, initial state and final states. It can only be obtained
//! through [`AutomatonBuilder::build`], which validates the definition, so a
//! value of this type always satisfies:
//!
//! - the initial state and every final state are members of the state set;
//! - every transition source and target is a member of the state set;
//! - every transition symbol is a member of the alphabet;
//! - each `(state, symbol)` pair has at most one target.
//!
//! The transition table may be partial. A missing entry is reported by the
//! simulator as an undefined transition, not as a silent rejection.

pub mod builder;
pub mod definition;
pub mod error;

pub use builder::{AutomatonBuilder, DuplicatePolicy, Override};
pub use definition::{AutomatonDefinition, Pairs};
pub use error::AutomatonError;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

/// Identifier of a state.
///
/// State ids are plain strings. Ids that parse as integers order numerically
/// (so `"2"` sorts before `"10"`) and come before all other ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    /// Create a state id from anything string-like
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for StateId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0.parse::<u64>(), other.0.parse::<u64>()) {
            (Ok(lhs), Ok(rhs)) => lhs.cmp(&rhs).then_with(|| self.0.cmp(&other.0)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for StateId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StateId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for StateId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<usize> for StateId {
    fn from(value: usize) -> Self {
        Self(value.to_string())
    }
}

/// Transition table: source state to (symbol to target state).
pub(crate) type Transitions = BTreeMap<StateId, BTreeMap<char, StateId>>;

/// A single transition of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    /// Source state
    pub from: &'a StateId,
    /// Symbol read
    pub symbol: char,
    /// Target state
    pub to: &'a StateId,
}

/// Immutable deterministic finite automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    pub(crate) states: BTreeSet<StateId>,
    pub(crate) input_symbols: BTreeSet<char>,
    pub(crate) transitions: Transitions,
    pub(crate) initial_state: StateId,
    pub(crate) final_states: BTreeSet<StateId>,
    pub(crate) overridden: Vec<Override>,
}

impl Automaton {
    /// Start building an automaton.
    pub fn builder() -> AutomatonBuilder {
        AutomatonBuilder::new()
    }

    /// All states, in id order.
    pub fn states(&self) -> &BTreeSet<StateId> {
        &self.states
    }

    /// The input alphabet.
    pub fn input_symbols(&self) -> &BTreeSet<char> {
        &self.input_symbols
    }

    /// The state every run starts in.
    pub fn initial_state(&self) -> &StateId {
        &self.initial_state
    }

    /// Accepting states.
    pub fn final_states(&self) -> &BTreeSet<StateId> {
        &self.final_states
    }

    /// Whether `state` is accepting.
    pub fn is_final(&self, state: &StateId) -> bool {
        self.final_states.contains(state)
    }

    /// Whether `symbol` belongs to the alphabet.
    pub fn accepts_symbol(&self, symbol: char) -> bool {
        self.input_symbols.contains(&symbol)
    }

    /// Target of the transition from `state` on `symbol`, if one is defined.
    pub fn next_state(&self, state: &StateId, symbol: char) -> Option<&StateId> {
        self.transitions.get(state)?.get(&symbol)
    }

    /// Iterate over every transition, ordered by source state then symbol.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> + '_ {
        self.transitions.iter().flat_map(|(from, targets)| {
            targets
                .iter()
                .map(move |(symbol, to)| Edge { from, symbol: *symbol, to })
        })
    }

    /// Number of defined transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(BTreeMap::len).sum()
    }

    /// Whether every `(state, symbol)` pair has a transition.
    pub fn is_total(&self) -> bool {
        self.transition_count() == self.states.len() * self.input_symbols.len()
    }

    /// Transitions that were replaced while building under
    /// [`DuplicatePolicy::LastWriteWins`].
    pub fn overridden(&self) -> &[Override] {
        &self.overridden
    }

    /// States reachable from the initial state.
    pub fn reachable_states(&self) -> BTreeSet<&StateId> {
        let mut visited = BTreeSet::from([&self.initial_state]);
        let mut queue = VecDeque::from([&self.initial_state]);

        while let Some(state) = queue.pop_front() {
            for target in self.transitions.get(state).into_iter().flat_map(BTreeMap::values) {
                if visited.insert(target) {
                    queue.push_back(target);
                }
            }
        }

        visited
    }

    /// Non-final states from which no input leads to a final state.
    pub fn dead_states(&self) -> BTreeSet<&StateId> {
        // Walk the transition graph backwards from the final states.
        let mut predecessors: BTreeMap<&StateId, Vec<&StateId>> = BTreeMap::new();
        for Edge { from, to, .. } in self.edges() {
            predecessors.entry(to).or_default().push(from);
        }

        let mut alive: BTreeSet<&StateId> = self.final_states.iter().collect();
        let mut queue: VecDeque<&StateId> = alive.iter().copied().collect();

        while let Some(state) = queue.pop_front() {
            for pred in predecessors.get(state).into_iter().flatten() {
                if alive.insert(pred) {
                    queue.push_back(pred);
                }
            }
        }

        self.states.iter().filter(|s| !alive.contains(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parity() -> Automaton {
        Automaton::builder()
            .states(["even", "odd", "sink"])
            .input_symbols(['0', '1'])
            .transition("even", '0', "even")
            .transition("even", '1', "odd")
            .transition("odd", '0', "odd")
            .transition("odd", '1', "even")
            .initial_state("even")
            .final_states(["even"])
            .build()
            .unwrap()
    }

    #[test]
    fn test_state_id_orders_numerically() {
        let mut ids: Vec<StateId> = ["10", "2", "x", "0", "13"].map(StateId::from).to_vec();
        ids.sort();
        let ids: Vec<&str> = ids.iter().map(StateId::as_str).collect();
        assert_eq!(ids, vec!["0", "2", "10", "13", "x"]);
    }

    #[test]
    fn test_state_id_ordering_consistent_with_eq() {
        let a = StateId::from("1");
        let b = StateId::from("01");
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
    }

    #[test]
    fn test_next_state() {
        let dfa = parity();
        assert_eq!(
            dfa.next_state(&"even".into(), '1'),
            Some(&StateId::from("odd"))
        );
        assert_eq!(dfa.next_state(&"sink".into(), '1'), None);
    }

    #[test]
    fn test_partial_table_is_not_total() {
        let dfa = parity();
        assert_eq!(dfa.transition_count(), 4);
        assert!(!dfa.is_total());
    }

    #[test]
    fn test_reachable_states_skip_sink() {
        let dfa = parity();
        let reachable = dfa.reachable_states();
        assert!(reachable.contains(&StateId::from("odd")));
        assert!(!reachable.contains(&StateId::from("sink")));
    }

    #[test]
    fn test_dead_states() {
        let dfa = parity();
        let dead: Vec<&str> = dfa.dead_states().into_iter().map(StateId::as_str).collect();
        assert_eq!(dead, vec!["sink"]);
    }
}
