//! # libdfa
//!
//! Deterministic finite automata with traced acceptance checks.
//!
//! An [`Automaton`](automaton::Automaton) is built once through a validating
//! builder and then shared read-only. [`simulate`](simulation::simulate) runs
//! an input string through it and returns the verdict together with the
//! sequence of states visited, which the [`render`] module turns into a step
//! table or a Graphviz graph with the taken path highlighted.
//!
//! Two automata ship with the crate (`a` over `{0, 1}` and `b` over `{a, b}`);
//! more can be loaded from JSON definitions into a
//! [`Registry`](registry::Registry).
//!
//! ## Example
//!
//! ```rust
//! use libdfa::prelude::*;
//!
//! let registry = Registry::builtin().unwrap();
//! let entry = registry.select("a").unwrap();
//!
//! let run = entry.check("111000");
//! assert_eq!(run.verdict, Verdict::Accepted);
//! assert_eq!(run.trace.last_state().as_str(), "7");
//!
//! let run = entry.check("10c");
//! assert!(run.verdict.is_error());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod automaton;
pub mod commands;
pub mod registry;
pub mod render;
pub mod simulation;

/// Interactive REPL for exploring the automata
#[cfg(feature = "cli")]
pub mod repl;

/// CLI interface and utilities
#[cfg(feature = "cli")]
pub mod cli;

/// Log subscriber setup for the binary
#[cfg(feature = "cli")]
pub mod logging;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::automaton::{
        Automaton, AutomatonBuilder, AutomatonDefinition, AutomatonError, DuplicatePolicy,
        StateId,
    };
    pub use crate::registry::{check_string, AutomatonId, Entry, Registry, RegistryError};
    pub use crate::render::{step_table, to_dot};
    pub use crate::simulation::{
        simulate, Simulate, Simulation, SimulationError, Simulator, Trace, Verdict,
    };
}
