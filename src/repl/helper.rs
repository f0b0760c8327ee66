//! Rustyline helper integration
//!
//! Provides completion, hinting, highlighting, and validation for the REPL.

use super::highlighter::{CommandHighlighter, COMMAND_WORDS};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::{Hinter, HistoryHinter};
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};
use std::borrow::Cow;

/// REPL helper
pub struct DfaHelper {
    highlighter: CommandHighlighter,
    hinter: HistoryHinter,
    commands: Vec<String>,
    automata: Vec<String>,
}

impl DfaHelper {
    /// Create a helper that completes the given automaton ids after `use`
    pub fn new<I, S>(automata: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            highlighter: CommandHighlighter::new(),
            hinter: HistoryHinter::new(),
            commands: [
                "use", "check", "show", "list", "render", "steps", "load", "settings", "help",
                "exit", "quit",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            automata: automata.into_iter().map(Into::into).collect(),
        }
    }

    /// Replace the ids offered after `use`
    pub fn set_automata<I, S>(&mut self, automata: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.automata = automata.into_iter().map(Into::into).collect();
    }

    fn candidates<'a>(
        options: impl Iterator<Item = &'a str>,
        prefix: &str,
        suffix: &str,
    ) -> Vec<Pair> {
        options
            .filter(|o| o.starts_with(prefix))
            .map(|o| Pair {
                display: o.to_string(),
                replacement: format!("{}{}", o, suffix),
            })
            .collect()
    }
}

impl Default for DfaHelper {
    fn default() -> Self {
        Self::new(["a", "b"])
    }
}

impl Helper for DfaHelper {}

impl Completer for DfaHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let line = &line[..pos];
        let parts: Vec<&str> = line.split_whitespace().collect();

        if parts.is_empty() {
            // Complete command names
            let candidates = Self::candidates(self.commands.iter().map(String::as_str), "", " ");
            return Ok((0, candidates));
        }

        let cmd = parts[0].to_lowercase();
        let start = line.rfind(char::is_whitespace).map(|i| i + 1).unwrap_or(0);

        // Command completion if still typing first word
        if parts.len() == 1 && !line.ends_with(char::is_whitespace) {
            let prefix = cmd.as_str();
            let candidates =
                Self::candidates(self.commands.iter().map(String::as_str), prefix, " ");
            return Ok((start, candidates));
        }

        // Context-specific completions, first argument only
        let typing = !line.ends_with(char::is_whitespace);
        let arg_index = if typing { parts.len() - 1 } else { parts.len() };
        if arg_index != 1 {
            return Ok((0, vec![]));
        }
        let prefix = if typing {
            parts[parts.len() - 1].to_lowercase()
        } else {
            String::new()
        };

        let candidates = match cmd.as_str() {
            "use" | "select" => {
                Self::candidates(self.automata.iter().map(String::as_str), &prefix, "")
            }
            "steps" => Self::candidates(["on", "off"].into_iter(), &prefix, ""),
            "help" | "?" => Self::candidates(COMMAND_WORDS.iter().copied(), &prefix, ""),
            _ => return Ok((0, vec![])),
        };
        Ok((start, candidates))
    }
}

impl Hinter for DfaHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for DfaHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_char(&self, line: &str, pos: usize, forced: bool) -> bool {
        self.highlighter.highlight_char(line, pos, forced)
    }
}

impl Validator for DfaHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        // Always accept input (validation happens during execution)
        Ok(ValidationResult::Valid(None))
    }
}
