//! Record of a single run.

use crate::automaton::StateId;
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// The ordered sequence of states visited while reading an input string.
///
/// `states()[0]` is the initial state and every consumed character appends
/// exactly one state, so `states().len() == consumed().chars().count() + 1`.
/// When a run aborts, the trace ends at the state the automaton was in before
/// the offending character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    input: String,
    states: Vec<StateId>,
    /// Byte offset into `input` of the first unconsumed character.
    consumed: usize,
}

/// A transition that was taken during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'a> {
    /// Zero-based index of the consumed character
    pub index: usize,
    /// State before reading the symbol
    pub from: &'a StateId,
    /// Symbol read
    pub symbol: char,
    /// State after reading the symbol
    pub to: &'a StateId,
}

impl Trace {
    pub(crate) fn start(initial: StateId) -> Self {
        Self {
            input: String::new(),
            states: vec![initial],
            consumed: 0,
        }
    }

    /// Record that `symbol` was read and led to `state`.
    pub(crate) fn push(&mut self, symbol: char, state: StateId) {
        self.input.push(symbol);
        self.consumed += symbol.len_utf8();
        self.states.push(state);
    }

    /// Add a symbol to the input without reading it.
    pub(crate) fn push_unread(&mut self, symbol: char) {
        self.input.push(symbol);
    }

    /// Attach input that was never handed to the simulator.
    pub(crate) fn append_unread(&mut self, unread: &str) {
        self.input.push_str(unread);
    }

    /// The full input the run was started with.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Visited states, starting with the initial state.
    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    /// The state the run ended in.
    pub fn last_state(&self) -> &StateId {
        // A trace always starts with the initial state.
        &self.states[self.states.len() - 1]
    }

    /// The prefix of the input that was read.
    pub fn consumed(&self) -> &str {
        &self.input[..self.consumed]
    }

    /// The part of the input that was not read.
    pub fn remaining(&self) -> &str {
        &self.input[self.consumed..]
    }

    /// Whether the whole input was read.
    pub fn is_complete(&self) -> bool {
        self.consumed == self.input.len()
    }

    /// Iterate over the transitions taken, in order.
    pub fn steps(&self) -> impl Iterator<Item = Step<'_>> + '_ {
        self.consumed()
            .chars()
            .zip(self.states.windows(2))
            .enumerate()
            .map(|(index, (symbol, pair))| Step {
                index,
                from: &pair[0],
                symbol,
                to: &pair[1],
            })
    }

    /// Iterate over `(state, remaining input)` configurations.
    ///
    /// The first item is `(initial state, whole input)`. For a complete run the
    /// last item is `(last state, "")`.
    pub fn configurations(&self) -> impl Iterator<Item = (&StateId, &str)> + '_ {
        let offsets = std::iter::once(0).chain(
            self.consumed()
                .char_indices()
                .map(|(offset, ch)| offset + ch.len_utf8()),
        );

        self.states
            .iter()
            .zip(offsets)
            .map(|(state, offset)| (state, &self.input[offset..]))
    }
}

/// Serialized with the read and unread parts as strings, so no byte offset
/// leaks into the output.
impl Serialize for Trace {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Trace", 4)?;
        state.serialize_field("input", self.input())?;
        state.serialize_field("states", self.states())?;
        state.serialize_field("consumed", self.consumed())?;
        state.serialize_field("remaining", self.remaining())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trace {
        let mut trace = Trace::start("0".into());
        trace.push('a', "1".into());
        trace.push('b', "2".into());
        trace.append_unread("c");
        trace
    }

    #[test]
    fn test_partial_trace() {
        let trace = sample();
        assert_eq!(trace.consumed(), "ab");
        assert_eq!(trace.remaining(), "c");
        assert!(!trace.is_complete());
        assert_eq!(trace.last_state().as_str(), "2");
    }

    #[test]
    fn test_configurations() {
        let trace = sample();
        let configs: Vec<(&str, &str)> = trace
            .configurations()
            .map(|(state, rest)| (state.as_str(), rest))
            .collect();
        assert_eq!(configs, vec![("0", "abc"), ("1", "bc"), ("2", "c")]);
    }

    #[test]
    fn test_steps_rebuild_consumed_input() {
        let trace = sample();
        let symbols: String = trace.steps().map(|s| s.symbol).collect();
        assert_eq!(symbols, trace.consumed());
        assert_eq!(trace.steps().count(), trace.states().len() - 1);
    }

    #[test]
    fn test_serialized_without_offsets() {
        let mut trace = Trace::start("s".into());
        trace.push('λ', "t".into());
        trace.push_unread('x');
        trace.append_unread("yz");

        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["input"], "λxyz");
        assert_eq!(json["states"], serde_json::json!(["s", "t"]));
        assert_eq!(json["consumed"], "λ");
        assert_eq!(json["remaining"], "xyz");
    }

    #[test]
    fn test_multibyte_offsets() {
        let mut trace = Trace::start("s".into());
        trace.push('λ', "t".into());
        trace.append_unread("x");
        assert_eq!(trace.consumed(), "λ");
        assert_eq!(trace.remaining(), "x");
        let last = trace.configurations().last().unwrap();
        assert_eq!(last, (&StateId::from("t"), "x"));
    }
}
