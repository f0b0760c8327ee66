//! Registry of named automata.
//!
//! A [`Registry`] maps an [`AutomatonId`] to an [`Entry`]: the automaton
//! itself plus display material (title, regular expression, grammar). The
//! built-in registry holds the two fixed automata `a` and `b`; more can be
//! loaded from JSON definition files.

pub mod builtin;

use crate::automaton::{Automaton, AutomatonDefinition, AutomatonError};
use crate::simulation::{simulate, Simulation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by registry lookups and definition loading.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No automaton is registered under the requested id.
    #[error("Unknown automaton '{id}'. Available: {available}")]
    UnknownAutomaton {
        /// Requested id
        id: String,
        /// Comma-separated list of registered ids
        available: String,
    },

    /// A definitions file could not be read.
    #[error("Failed to read definitions from {path}: {source}")]
    Io {
        /// File that was being read
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A definitions file is not valid JSON for a definition.
    #[error("Failed to parse definitions: {0}")]
    Json(#[from] serde_json::Error),

    /// A definition parsed but describes an invalid automaton.
    #[error("Invalid definition '{id}': {source}")]
    Definition {
        /// Id of the offending definition
        id: String,
        /// What was wrong with it
        #[source]
        source: AutomatonError,
    },
}

/// Key of a registry entry. Case-insensitive; stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AutomatonId(String);

impl AutomatonId {
    /// Create an id, normalising case and surrounding whitespace
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_lowercase())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AutomatonId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AutomatonId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&AutomatonId> for AutomatonId {
    fn from(value: &AutomatonId) -> Self {
        value.clone()
    }
}

impl From<AutomatonId> for String {
    fn from(value: AutomatonId) -> Self {
        value.0
    }
}

impl FromStr for AutomatonId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for AutomatonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A grammar production `head -> alt1 | alt2 | ...`, kept for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    /// Variable on the left-hand side
    pub head: String,
    /// Alternative bodies; `λ` is the empty body
    pub alternatives: Vec<String>,
}

impl Production {
    /// Create a production from its head and alternatives
    pub fn new<I, S>(head: impl Into<String>, alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            head: head.into(),
            alternatives: alternatives.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.head, self.alternatives.join(" | "))
    }
}

impl FromStr for Production {
    type Err = String;

    /// Parse `"A -> aB | λ"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (head, body) = s
            .split_once("->")
            .ok_or_else(|| format!("Production '{}' is missing '->'", s))?;
        let head = head.trim();
        if head.is_empty() {
            return Err(format!("Production '{}' has an empty head", s));
        }
        Ok(Self::new(head, body.split('|').map(str::trim)))
    }
}

/// A named automaton with its display material.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Registry key
    pub id: AutomatonId,
    /// Human-readable title
    pub title: String,
    /// Regular expression the automaton recognises, if known
    pub regex: Option<String>,
    /// Context-free grammar for the same language, if known
    pub grammar: Vec<Production>,
    /// The automaton itself
    pub automaton: Arc<Automaton>,
}

impl Entry {
    /// Simulate `input` against this entry's automaton
    pub fn check(&self, input: &str) -> Simulation {
        simulate(&self.automaton, input)
    }
}

/// JSON form of an [`Entry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryDefinition {
    /// Registry key
    pub id: String,
    /// Human-readable title (defaults to the id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Regular expression text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    /// Productions such as `"A -> aA | λ"`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub grammar: Vec<String>,
    /// The automaton
    #[serde(flatten)]
    pub automaton: AutomatonDefinition,
}

impl EntryDefinition {
    /// Validate and turn the definition into a registry entry.
    pub fn into_entry(self) -> Result<Entry, RegistryError> {
        let automaton = self
            .automaton
            .build()
            .map_err(|source| RegistryError::Definition {
                id: self.id.clone(),
                source,
            })?;

        // Malformed productions are display-only; keep them verbatim.
        let grammar = self
            .grammar
            .iter()
            .map(|rule| {
                rule.parse()
                    .unwrap_or_else(|_| Production::new(rule.trim(), Vec::<String>::new()))
            })
            .collect();

        Ok(Entry {
            id: AutomatonId::new(&self.id),
            title: self.title.unwrap_or_else(|| self.id.clone()),
            regex: self.regex,
            grammar,
            automaton: Arc::new(automaton),
        })
    }
}

impl From<&Entry> for EntryDefinition {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.to_string(),
            title: Some(entry.title.clone()),
            regex: entry.regex.clone(),
            grammar: entry.grammar.iter().map(ToString::to_string).collect(),
            automaton: AutomatonDefinition::from(entry.automaton.as_ref()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DefinitionFile {
    Many(Vec<EntryDefinition>),
    One(EntryDefinition),
}

/// Keyed lookup table of automata.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<AutomatonId, Entry>,
}

impl Registry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in automata `a` and `b`.
    ///
    /// # Errors
    ///
    /// Only if a built-in table is broken, which the tests guard against.
    pub fn builtin() -> Result<Self, AutomatonError> {
        let mut registry = Self::new();
        registry.insert(builtin::entry_a()?);
        registry.insert(builtin::entry_b()?);
        Ok(registry)
    }

    /// Add an entry, replacing any entry with the same id.
    pub fn insert(&mut self, entry: Entry) -> Option<Entry> {
        tracing::debug!(
            id = %entry.id,
            states = entry.automaton.states().len(),
            "registering automaton"
        );
        self.entries.insert(entry.id.clone(), entry)
    }

    /// Look up an entry by id.
    pub fn select(&self, id: impl Into<AutomatonId>) -> Result<&Entry, RegistryError> {
        let id = id.into();
        self.entries
            .get(&id)
            .ok_or_else(|| RegistryError::UnknownAutomaton {
                id: id.to_string(),
                available: self
                    .ids()
                    .map(AutomatonId::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Whether an entry exists for `id`
    pub fn contains(&self, id: &AutomatonId) -> bool {
        self.entries.contains_key(id)
    }

    /// Registered ids in order
    pub fn ids(&self) -> impl Iterator<Item = &AutomatonId> + '_ {
        self.entries.keys()
    }

    /// Registered entries in id order
    pub fn entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.values()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse definitions from JSON text holding one definition or an array.
    ///
    /// Nothing is registered unless every definition is valid. Returns the
    /// ids that were added or replaced.
    pub fn load_json(&mut self, json: &str) -> Result<Vec<AutomatonId>, RegistryError> {
        let definitions = match serde_json::from_str(json)? {
            DefinitionFile::Many(definitions) => definitions,
            DefinitionFile::One(definition) => vec![definition],
        };

        let entries = definitions
            .into_iter()
            .map(EntryDefinition::into_entry)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries
            .into_iter()
            .map(|entry| {
                let id = entry.id.clone();
                self.insert(entry);
                id
            })
            .collect())
    }

    /// Read a JSON definitions file and register its automata.
    pub fn load_definitions(&mut self, path: &Path) -> Result<Vec<AutomatonId>, RegistryError> {
        let json = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let ids = self.load_json(&json)?;
        tracing::info!(path = %path.display(), count = ids.len(), "loaded automaton definitions");
        Ok(ids)
    }
}

/// Simulate `input` against `automaton`, returning verdict and trace.
pub fn check_string(automaton: &Automaton, input: &str) -> Simulation {
    simulate(automaton, input)
}
