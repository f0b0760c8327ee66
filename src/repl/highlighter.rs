//! Syntax highlighting for REPL input

use colored::Colorize;
use rustyline::highlight::Highlighter;

/// Every command word and alias the parser accepts
pub const COMMAND_WORDS: &[&str] = &[
    "use", "select", "check", "test", "c", "show", "info", "list", "ls", "render", "dot",
    "steps", "load", "settings", "set", "help", "?", "exit", "quit",
];

/// Command highlighter
pub struct CommandHighlighter {
    commands: Vec<String>,
}

impl CommandHighlighter {
    /// Create a highlighter that knows every command word
    pub fn new() -> Self {
        Self {
            commands: COMMAND_WORDS.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn highlight_command(&self, line: &str) -> String {
        let Some(cmd) = line.split_whitespace().next() else {
            return line.to_string();
        };

        if !self.commands.iter().any(|c| c == &cmd.to_lowercase()) {
            return line.to_string();
        }

        // Keep the user's spacing; only the command word is recoloured.
        let start = line.len() - line.trim_start().len();
        let end = start + cmd.len();
        let rest = &line[end..];
        let highlighted_cmd = cmd.blue().bold().to_string();

        format!(
            "{}{}{}",
            &line[..start],
            highlighted_cmd,
            self.highlight_args(rest, &cmd.to_lowercase())
        )
    }

    fn highlight_args(&self, args: &str, cmd: &str) -> String {
        match cmd {
            // The argument of a check is a test string; show it as data.
            "check" | "test" | "c" => args.cyan().to_string(),
            "steps" => args
                .replace("on", &"on".green().to_string())
                .replace("off", &"off".red().to_string()),
            "use" | "select" => args.yellow().to_string(),
            _ => args.to_string(),
        }
    }
}

impl Default for CommandHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for CommandHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> std::borrow::Cow<'l, str> {
        std::borrow::Cow::Owned(self.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}
