//! DFA acceptance engine.
//!
//! [`simulate`] reads an input string against an [`Automaton`] and returns a
//! [`Simulation`]: the [`Verdict`] and the [`Trace`] of visited states. It is a
//! single linear pass with no backtracking, since a deterministic automaton
//! has at most one transition per symbol.
//!
//! The engine driving the automaton has two control states, [`Phase::Running`]
//! and [`Phase::Halted`]. Once halted nothing moves it again; an invalid
//! symbol or a missing transition halts the run on the spot and the trace
//! keeps everything up to that point.

pub mod trace;
pub mod verdict;

pub use trace::{Step, Trace};
pub use verdict::{Simulation, SimulationError, Verdict};

use crate::automaton::Automaton;

/// Control state of a [`Simulator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Still reading input.
    Running,
    /// Stopped; terminal.
    Halted(Verdict),
}

impl Phase {
    /// Whether the simulator has stopped
    pub fn is_halted(&self) -> bool {
        matches!(self, Self::Halted(_))
    }
}

/// Anything that can be driven one symbol at a time.
pub trait Simulate {
    /// Returns whether the machine currently accepts, i.e. the input read so
    /// far would be accepted if it ended here.
    fn is_accepting(&self) -> bool;

    /// Feeds a single character and returns whether the machine now accepts.
    fn feed(&mut self, symbol: char) -> bool;

    /// Feeds the whole input and returns whether the machine accepts it.
    fn run(mut self, input: &str) -> bool
    where
        Self: Sized,
    {
        let accept = self.is_accepting();
        input.chars().map(|c| self.feed(c)).last().unwrap_or(accept)
    }
}

/// Incremental simulation of a single run.
#[derive(Debug, Clone)]
pub struct Simulator<'a> {
    automaton: &'a Automaton,
    trace: Trace,
    /// Character index of the next symbol.
    position: usize,
    phase: Phase,
}

impl<'a> Simulator<'a> {
    /// Start a run in the automaton's initial state.
    pub fn new(automaton: &'a Automaton) -> Self {
        Self {
            automaton,
            trace: Trace::start(automaton.initial_state().clone()),
            position: 0,
            phase: Phase::Running,
        }
    }

    /// Current control state
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The state the automaton is in
    pub fn current_state(&self) -> &crate::automaton::StateId {
        self.trace.last_state()
    }

    /// Trace recorded so far
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Read one symbol.
    ///
    /// The symbol that halts the run, and every symbol given after that, is
    /// kept in the trace input as unread. Feeding a whole string therefore
    /// gives the same trace as [`simulate`].
    pub fn step(&mut self, symbol: char) -> &Phase {
        if self.phase.is_halted() {
            self.trace.push_unread(symbol);
            return &self.phase;
        }

        let state = self.trace.last_state().clone();
        let position = self.position;

        if !self.automaton.accepts_symbol(symbol) {
            tracing::debug!(%state, %symbol, position, "invalid symbol");
            self.trace.push_unread(symbol);
            self.phase = Phase::Halted(Verdict::InvalidSymbol {
                symbol,
                position,
                state,
            });
            return &self.phase;
        }

        match self.automaton.next_state(&state, symbol) {
            Some(next) => {
                tracing::trace!(from = %state, %symbol, to = %next, position, "step");
                self.trace.push(symbol, next.clone());
                self.position += 1;
            }
            None => {
                tracing::debug!(%state, %symbol, position, "undefined transition");
                self.trace.push_unread(symbol);
                self.phase = Phase::Halted(Verdict::UndefinedTransition {
                    symbol,
                    position,
                    state,
                });
            }
        }

        &self.phase
    }

    /// End the run and produce the final [`Simulation`].
    pub fn finish(self) -> Simulation {
        let verdict = match self.phase {
            Phase::Halted(verdict) => verdict,
            Phase::Running if self.automaton.is_final(self.trace.last_state()) => {
                Verdict::Accepted
            }
            Phase::Running => Verdict::Rejected,
        };

        Simulation {
            verdict,
            trace: self.trace,
        }
    }
}

impl Simulate for Simulator<'_> {
    fn is_accepting(&self) -> bool {
        !self.phase.is_halted() && self.automaton.is_final(self.trace.last_state())
    }

    fn feed(&mut self, symbol: char) -> bool {
        self.step(symbol);
        self.is_accepting()
    }
}

/// Run `input` through `automaton`.
///
/// Pure and deterministic: the same automaton and input always give the same
/// verdict and trace. Empty input is valid and is accepted exactly when the
/// initial state is final.
pub fn simulate(automaton: &Automaton, input: &str) -> Simulation {
    let mut simulator = Simulator::new(automaton);
    let mut unread = "";

    for (offset, symbol) in input.char_indices() {
        if simulator.step(symbol).is_halted() {
            // The halting symbol is already in the trace.
            unread = &input[offset + symbol.len_utf8()..];
            break;
        }
    }

    let mut simulation = simulator.finish();
    simulation.trace.append_unread(unread);

    tracing::debug!(
        verdict = simulation.verdict.label(),
        steps = simulation.trace.states().len() - 1,
        "simulation finished"
    );

    simulation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::StateId;

    /// Accepts strings over {a, b} ending in "ab"; state "2" has no `a` edge.
    fn ends_in_ab() -> Automaton {
        Automaton::builder()
            .states(["0", "1", "2"])
            .input_symbols(['a', 'b'])
            .transitions_from("0", [('a', "1"), ('b', "0")])
            .transitions_from("1", [('a', "1"), ('b', "2")])
            .transition("2", 'b', "0")
            .initial_state("0")
            .final_states(["2"])
            .build()
            .unwrap()
    }

    fn states(sim: &Simulation) -> Vec<&str> {
        sim.trace.states().iter().map(StateId::as_str).collect()
    }

    #[test]
    fn test_accepted() {
        let sim = simulate(&ends_in_ab(), "bab");
        assert_eq!(sim.verdict, Verdict::Accepted);
        assert_eq!(states(&sim), vec!["0", "0", "1", "2"]);
        assert!(sim.trace.is_complete());
    }

    #[test]
    fn test_rejected() {
        let sim = simulate(&ends_in_ab(), "aa");
        assert_eq!(sim.verdict, Verdict::Rejected);
        assert_eq!(sim.trace.last_state().as_str(), "1");
    }

    #[test]
    fn test_empty_input_checks_initial_state() {
        let sim = simulate(&ends_in_ab(), "");
        assert_eq!(sim.verdict, Verdict::Rejected);
        assert_eq!(states(&sim), vec!["0"]);
    }

    #[test]
    fn test_invalid_symbol_truncates_trace() {
        let sim = simulate(&ends_in_ab(), "abxb");
        assert_eq!(
            sim.verdict,
            Verdict::InvalidSymbol {
                symbol: 'x',
                position: 2,
                state: "2".into(),
            }
        );
        assert_eq!(states(&sim), vec!["0", "1", "2"]);
        assert_eq!(sim.trace.consumed(), "ab");
        assert_eq!(sim.trace.remaining(), "xb");
        assert_eq!(sim.trace.input(), "abxb");
    }

    #[test]
    fn test_undefined_transition() {
        let sim = simulate(&ends_in_ab(), "aba");
        assert_eq!(
            sim.verdict,
            Verdict::UndefinedTransition {
                symbol: 'a',
                position: 2,
                state: "2".into(),
            }
        );
        assert!(sim.verdict.is_error());
        assert_eq!(sim.trace.remaining(), "a");
    }

    #[test]
    fn test_into_result() {
        assert!(simulate(&ends_in_ab(), "ab").into_result().is_ok());
        assert!(simulate(&ends_in_ab(), "b").into_result().is_ok());

        let err = simulate(&ends_in_ab(), "c").into_result().unwrap_err();
        assert!(matches!(
            err,
            SimulationError::InvalidSymbol {
                symbol: 'c',
                position: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_halted_simulator_ignores_input() {
        let dfa = ends_in_ab();
        let mut sim = Simulator::new(&dfa);
        sim.step('q');
        assert!(sim.phase().is_halted());
        sim.step('a');
        assert_eq!(sim.current_state().as_str(), "0");
        assert_eq!(sim.trace().states().len(), 1);
        assert_eq!(sim.trace().remaining(), "qa");
    }

    #[test]
    fn test_stepping_matches_simulate_after_halt() {
        let dfa = ends_in_ab();
        for input in ["abxb", "aba", "abab", "x"] {
            let mut stepper = Simulator::new(&dfa);
            for symbol in input.chars() {
                stepper.step(symbol);
            }
            let stepped = stepper.finish();
            assert_eq!(stepped, simulate(&dfa, input), "{}", input);
            assert_eq!(stepped.trace.input(), input);
        }

        let mut stepper = Simulator::new(&dfa);
        stepper.step('a');
        stepper.step('x');
        let stopped = stepper.finish();
        assert_eq!(stopped.trace.consumed(), "a");
        assert_eq!(stopped.trace.remaining(), "x");
    }

    #[test]
    fn test_simulate_trait_run() {
        let dfa = ends_in_ab();
        assert!(Simulator::new(&dfa).run("aab"));
        assert!(!Simulator::new(&dfa).run("aba"));
        assert!(!Simulator::new(&dfa).run(""));
    }
}
