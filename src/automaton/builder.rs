//! Builder pattern for creating [`Automaton`] instances.
//!
//! The builder collects states, symbols and transitions in any order and
//! validates everything at once in [`AutomatonBuilder::build`].
//!
//! # Example
//!
//! ```rust
//! use libdfa::automaton::Automaton;
//!
//! let dfa = Automaton::builder()
//!     .states(["q0", "q1"])
//!     .input_symbols(['a'])
//!     .transition("q0", 'a', "q1")
//!     .transition("q1", 'a', "q0")
//!     .initial_state("q0")
//!     .final_states(["q1"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(dfa.states().len(), 2);
//! ```

use super::error::{AutomatonError, Result};
use super::{Automaton, StateId, Transitions};
use std::collections::btree_map::Entry;
use std::collections::BTreeSet;

/// How the builder treats a second definition of the same `(state, symbol)`
/// pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Fail with [`AutomatonError::DuplicateTransition`].
    #[default]
    Reject,
    /// Keep the later definition and record the replaced one in
    /// [`Automaton::overridden`].
    LastWriteWins,
}

/// A transition that was replaced by a later definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    /// Source state
    pub state: StateId,
    /// Symbol of the transition
    pub symbol: char,
    /// Target of the earlier, discarded definition
    pub discarded: StateId,
    /// Target that is in effect
    pub kept: StateId,
}

/// Builder for constructing an [`Automaton`] with a fluent API.
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    states: BTreeSet<StateId>,
    input_symbols: BTreeSet<char>,
    transitions: Vec<(StateId, char, StateId)>,
    initial_state: Option<StateId>,
    final_states: BTreeSet<StateId>,
    duplicate_policy: DuplicatePolicy,
}

impl AutomatonBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single state.
    pub fn state(mut self, state: impl Into<StateId>) -> Self {
        self.states.insert(state.into());
        self
    }

    /// Add several states.
    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Add symbols to the input alphabet.
    pub fn input_symbols(mut self, symbols: impl IntoIterator<Item = char>) -> Self {
        self.input_symbols.extend(symbols);
        self
    }

    /// Add the transition `from --symbol--> to`.
    ///
    /// Transitions are checked in the order they were added, which is what
    /// decides the survivor under [`DuplicatePolicy::LastWriteWins`].
    pub fn transition(
        mut self,
        from: impl Into<StateId>,
        symbol: char,
        to: impl Into<StateId>,
    ) -> Self {
        self.transitions.push((from.into(), symbol, to.into()));
        self
    }

    /// Add all transitions leaving `from`, given as `(symbol, target)` pairs.
    pub fn transitions_from<I, S>(mut self, from: impl Into<StateId>, targets: I) -> Self
    where
        I: IntoIterator<Item = (char, S)>,
        S: Into<StateId>,
    {
        let from = from.into();
        self.transitions.extend(
            targets
                .into_iter()
                .map(|(symbol, to)| (from.clone(), symbol, to.into())),
        );
        self
    }

    /// Set the initial state.
    pub fn initial_state(mut self, state: impl Into<StateId>) -> Self {
        self.initial_state = Some(state.into());
        self
    }

    /// Add accepting states.
    pub fn final_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.final_states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Choose how duplicate `(state, symbol)` definitions are handled.
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Validate the definition and build the [`Automaton`].
    ///
    /// # Errors
    ///
    /// Returns the first [`AutomatonError`] found. States and final states are
    /// checked before transitions, and transitions in insertion order.
    pub fn build(self) -> Result<Automaton> {
        if self.states.is_empty() {
            return Err(AutomatonError::NoStates);
        }

        let initial_state = self
            .initial_state
            .ok_or(AutomatonError::MissingInitialState)?;
        if !self.states.contains(&initial_state) {
            return Err(AutomatonError::UnknownInitialState(initial_state));
        }

        if let Some(unknown) = self.final_states.difference(&self.states).next() {
            return Err(AutomatonError::UnknownFinalState(unknown.clone()));
        }

        let mut table = Transitions::new();
        let mut overridden = Vec::new();

        for (from, symbol, to) in self.transitions {
            if !self.states.contains(&from) {
                return Err(AutomatonError::UnknownSource {
                    state: from,
                    symbol,
                });
            }
            if !self.input_symbols.contains(&symbol) {
                return Err(AutomatonError::UnknownSymbol {
                    state: from,
                    symbol,
                });
            }
            if !self.states.contains(&to) {
                return Err(AutomatonError::UnknownTarget {
                    state: from,
                    symbol,
                    target: to,
                });
            }

            match table.entry(from.clone()).or_default().entry(symbol) {
                Entry::Vacant(slot) => {
                    slot.insert(to);
                }
                Entry::Occupied(mut slot) => match self.duplicate_policy {
                    DuplicatePolicy::Reject => {
                        return Err(AutomatonError::DuplicateTransition {
                            state: from,
                            symbol,
                            first: slot.get().clone(),
                            second: to,
                        });
                    }
                    DuplicatePolicy::LastWriteWins => {
                        let discarded = slot.insert(to.clone());
                        tracing::warn!(
                            state = %from,
                            %symbol,
                            %discarded,
                            kept = %to,
                            "duplicate transition overridden"
                        );
                        overridden.push(Override {
                            state: from,
                            symbol,
                            discarded,
                            kept: to,
                        });
                    }
                },
            }
        }

        tracing::debug!(
            states = self.states.len(),
            symbols = self.input_symbols.len(),
            overridden = overridden.len(),
            "built automaton"
        );

        Ok(Automaton {
            states: self.states,
            input_symbols: self.input_symbols,
            transitions: table,
            initial_state,
            final_states: self.final_states,
            overridden,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> AutomatonBuilder {
        AutomatonBuilder::new()
            .states(["0", "1"])
            .input_symbols(['x', 'y'])
            .initial_state("0")
            .final_states(["1"])
    }

    #[test]
    fn test_build_valid() {
        let dfa = base()
            .transitions_from("0", [('x', "1"), ('y', "0")])
            .transition("1", 'x', "1")
            .build()
            .unwrap();

        assert_eq!(dfa.initial_state().as_str(), "0");
        assert_eq!(dfa.transition_count(), 3);
        assert!(dfa.overridden().is_empty());
    }

    #[test]
    fn test_no_states() {
        let err = AutomatonBuilder::new().initial_state("0").build().unwrap_err();
        assert_eq!(err, AutomatonError::NoStates);
    }

    #[test]
    fn test_missing_initial_state() {
        let err = AutomatonBuilder::new().state("0").build().unwrap_err();
        assert_eq!(err, AutomatonError::MissingInitialState);
    }

    #[test]
    fn test_unknown_initial_state() {
        let err = base().initial_state("7").build().unwrap_err();
        assert_eq!(err, AutomatonError::UnknownInitialState("7".into()));
    }

    #[test]
    fn test_unknown_final_state() {
        let err = base().final_states(["9"]).build().unwrap_err();
        assert_eq!(err, AutomatonError::UnknownFinalState("9".into()));
    }

    #[test]
    fn test_unknown_source() {
        let err = base().transition("5", 'x', "0").build().unwrap_err();
        assert!(matches!(err, AutomatonError::UnknownSource { symbol: 'x', .. }));
    }

    #[test]
    fn test_unknown_target() {
        let err = base().transition("0", 'x', "5").build().unwrap_err();
        assert_eq!(
            err,
            AutomatonError::UnknownTarget {
                state: "0".into(),
                symbol: 'x',
                target: "5".into(),
            }
        );
    }

    #[test]
    fn test_unknown_symbol() {
        let err = base().transition("0", 'z', "1").build().unwrap_err();
        assert!(matches!(err, AutomatonError::UnknownSymbol { symbol: 'z', .. }));
    }

    #[test]
    fn test_duplicate_rejected_by_default() {
        let err = base()
            .transition("0", 'x', "0")
            .transition("0", 'x', "1")
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            AutomatonError::DuplicateTransition {
                state: "0".into(),
                symbol: 'x',
                first: "0".into(),
                second: "1".into(),
            }
        );
    }

    #[test]
    fn test_duplicate_last_write_wins() {
        let dfa = base()
            .duplicate_policy(DuplicatePolicy::LastWriteWins)
            .transition("0", 'x', "0")
            .transition("0", 'x', "1")
            .build()
            .unwrap();

        assert_eq!(dfa.next_state(&"0".into(), 'x'), Some(&StateId::from("1")));
        assert_eq!(
            dfa.overridden(),
            &[Override {
                state: "0".into(),
                symbol: 'x',
                discarded: "0".into(),
                kept: "1".into(),
            }]
        );
    }
}
