//! Serializable form of an automaton.
//!
//! The layout mirrors the usual textbook tuple and the nested
//! `state -> symbol -> target` table, so a definition reads the same in JSON
//! as it does on paper:
//!
//! ```json
//! {
//!   "states": ["e", "o"],
//!   "input_symbols": ["0", "1"],
//!   "transitions": {"e": {"0": "e", "1": "o"}, "o": {"0": "o", "1": "e"}},
//!   "initial_state": "e",
//!   "final_states": ["e"]
//! }
//! ```
//!
//! The transition rows are read as [`Pairs`] rather than maps, so a key
//! written twice reaches the builder and fails the build.

use super::error::{AutomatonError, Result};
use super::{Automaton, DuplicatePolicy};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// A JSON object kept as its key/value pairs in document order.
///
/// Unlike a map, a repeated key stays a second pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairs<V>(pub Vec<(String, V)>);

impl<V> Pairs<V> {
    /// Iterate over the pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<V> Default for Pairs<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V: Serialize> Serialize for Pairs<V> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Pairs<V> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(PairsVisitor(PhantomData))
    }
}

struct PairsVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for PairsVisitor<V> {
    type Value = Pairs<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(pair) = access.next_entry()? {
            pairs.push(pair);
        }
        Ok(Pairs(pairs))
    }
}

/// Plain-data automaton definition, as read from or written to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatonDefinition {
    /// State ids
    pub states: Vec<String>,
    /// Input symbols, each a one-character string
    pub input_symbols: Vec<String>,
    /// `state -> symbol -> target`, every written pair kept
    pub transitions: Pairs<Pairs<String>>,
    /// Initial state id
    pub initial_state: String,
    /// Accepting state ids
    pub final_states: Vec<String>,
}

impl AutomatonDefinition {
    /// Validate the definition and build an [`Automaton`].
    ///
    /// Definitions are always built with [`DuplicatePolicy::Reject`]; a
    /// `(state, symbol)` pair written twice is a
    /// [`AutomatonError::DuplicateTransition`].
    pub fn build(&self) -> Result<Automaton> {
        let input_symbols = self
            .input_symbols
            .iter()
            .map(|s| parse_symbol(s))
            .collect::<Result<Vec<_>>>()?;

        let builder = Automaton::builder()
            .states(self.states.iter().map(String::as_str))
            .input_symbols(input_symbols)
            .initial_state(self.initial_state.as_str())
            .final_states(self.final_states.iter().map(String::as_str))
            .duplicate_policy(DuplicatePolicy::Reject);

        let builder = self
            .transitions
            .iter()
            .flat_map(|(from, targets)| targets.iter().map(move |(sym, to)| (from, sym, to)))
            .try_fold(builder, |builder, (from, sym, to)| {
                Ok::<_, AutomatonError>(builder.transition(from, parse_symbol(sym)?, to.as_str()))
            })?;

        builder.build()
    }
}

impl From<&Automaton> for AutomatonDefinition {
    fn from(automaton: &Automaton) -> Self {
        // Edges come sorted by source, so each row is one run of edges.
        let mut transitions: Vec<(String, Pairs<String>)> = Vec::new();
        for edge in automaton.edges() {
            let pair = (edge.symbol.to_string(), edge.to.to_string());
            match transitions.last_mut() {
                Some((from, row)) if from == edge.from.as_str() => row.0.push(pair),
                _ => transitions.push((edge.from.to_string(), Pairs(vec![pair]))),
            }
        }

        Self {
            states: automaton.states().iter().map(ToString::to_string).collect(),
            input_symbols: automaton
                .input_symbols()
                .iter()
                .map(ToString::to_string)
                .collect(),
            transitions: Pairs(transitions),
            initial_state: automaton.initial_state().to_string(),
            final_states: automaton
                .final_states()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

fn parse_symbol(literal: &str) -> Result<char> {
    let mut chars = literal.chars();
    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(AutomatonError::InvalidSymbolLiteral(literal.to_string())),
    }
}
