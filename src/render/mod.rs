//! Output formats for automata and runs.
//!
//! - [`dot`]: Graphviz digraph of the automaton, with the taken path
//!   highlighted when a run is supplied
//! - [`table`]: aligned step table of a run and the transition table of an
//!   automaton

pub mod dot;
pub mod table;

pub use dot::to_dot;
pub use table::{step_table, transition_table};
