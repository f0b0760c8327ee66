//! Error types for automaton construction.

use super::StateId;
use thiserror::Error;

/// Errors that can occur while building an [`Automaton`](super::Automaton).
///
/// Every variant describes a broken invariant of the definition itself. They
/// are raised by [`AutomatonBuilder::build`](super::AutomatonBuilder::build),
/// never during simulation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    /// The automaton has no states at all.
    #[error("Automaton has no states")]
    NoStates,

    /// No initial state was provided.
    #[error("Initial state is required. Use .initial_state() to set it.")]
    MissingInitialState,

    /// The initial state is not a member of the state set.
    #[error("Initial state '{0}' is not a state of the automaton")]
    UnknownInitialState(StateId),

    /// A final state is not a member of the state set.
    #[error("Final state '{0}' is not a state of the automaton")]
    UnknownFinalState(StateId),

    /// A transition leaves from a state that does not exist.
    #[error("Transition on '{symbol}' leaves from unknown state '{state}'")]
    UnknownSource {
        /// Source state of the transition
        state: StateId,
        /// Symbol of the transition
        symbol: char,
    },

    /// A transition points at a state that does not exist.
    #[error("Transition '{state}' --{symbol}--> '{target}' targets an unknown state")]
    UnknownTarget {
        /// Source state of the transition
        state: StateId,
        /// Symbol of the transition
        symbol: char,
        /// Target that is missing from the state set
        target: StateId,
    },

    /// A transition is labelled with a symbol outside the alphabet.
    #[error("Transition from '{state}' uses symbol '{symbol}' which is not in the alphabet")]
    UnknownSymbol {
        /// Source state of the transition
        state: StateId,
        /// Offending symbol
        symbol: char,
    },

    /// The same `(state, symbol)` pair was defined twice.
    ///
    /// Only raised under [`DuplicatePolicy::Reject`](super::DuplicatePolicy::Reject).
    #[error(
        "Transition from '{state}' on '{symbol}' is defined twice (to '{first}' and to '{second}')"
    )]
    DuplicateTransition {
        /// Source state of the transition
        state: StateId,
        /// Symbol of the transition
        symbol: char,
        /// Target of the first definition
        first: StateId,
        /// Target of the second definition
        second: StateId,
    },

    /// A symbol in a textual definition is not exactly one character long.
    #[error("Input symbol '{0}' must be exactly one character")]
    InvalidSymbolLiteral(String),
}

/// A specialized `Result` type for automaton construction.
pub type Result<T> = std::result::Result<T, AutomatonError>;
