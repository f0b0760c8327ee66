//! Outcome of a run.

use super::trace::Trace;
use crate::automaton::StateId;
use serde::Serialize;
use thiserror::Error;

/// How a run ended.
///
/// `Accepted` and `Rejected` are both normal outcomes of reading the whole
/// input. The other two variants mean the input was malformed for this
/// automaton and the run was aborted at `position` (a character index).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The whole input was read and the run ended in a final state.
    Accepted,
    /// The whole input was read and the run ended outside the final states.
    Rejected,
    /// A character outside the alphabet was found.
    InvalidSymbol {
        /// Offending character
        symbol: char,
        /// Character index of `symbol` in the input
        position: usize,
        /// State the run was in
        state: StateId,
    },
    /// The current state has no transition on an alphabet character.
    UndefinedTransition {
        /// Character without a transition
        symbol: char,
        /// Character index of `symbol` in the input
        position: usize,
        /// State the run was in
        state: StateId,
    },
}

impl Verdict {
    /// Whether the input was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Whether the run was aborted on malformed input
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSymbol { .. } | Self::UndefinedTransition { .. }
        )
    }

    /// Short lowercase name of the outcome
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::InvalidSymbol { .. } => "invalid symbol",
            Self::UndefinedTransition { .. } => "undefined transition",
        }
    }

    /// The error carried by an aborted run.
    pub fn error(&self) -> Option<SimulationError> {
        match self {
            Self::Accepted | Self::Rejected => None,
            Self::InvalidSymbol {
                symbol,
                position,
                state,
            } => Some(SimulationError::InvalidSymbol {
                symbol: *symbol,
                position: *position,
                state: state.clone(),
            }),
            Self::UndefinedTransition {
                symbol,
                position,
                state,
            } => Some(SimulationError::UndefinedTransition {
                symbol: *symbol,
                position: *position,
                state: state.clone(),
            }),
        }
    }
}

/// Malformed input, as an error value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// A character outside the alphabet was found.
    #[error("Invalid symbol '{symbol}' at position {position} (not in the alphabet)")]
    InvalidSymbol {
        /// Offending character
        symbol: char,
        /// Character index of `symbol` in the input
        position: usize,
        /// State the run was in
        state: StateId,
    },
    /// The current state has no transition on an alphabet character.
    #[error("No transition from state '{state}' on '{symbol}' at position {position}")]
    UndefinedTransition {
        /// Character without a transition
        symbol: char,
        /// Character index of `symbol` in the input
        position: usize,
        /// State the run was in
        state: StateId,
    },
}

/// Verdict plus the trace of the run that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Simulation {
    /// How the run ended
    #[serde(flatten)]
    pub verdict: Verdict,
    /// States visited
    pub trace: Trace,
}

impl Simulation {
    /// Whether the input was accepted
    pub fn is_accepted(&self) -> bool {
        self.verdict.is_accepted()
    }

    /// Turn an aborted run into an `Err`, keeping accepted and rejected runs.
    pub fn into_result(self) -> Result<Self, SimulationError> {
        match self.verdict.error() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}
