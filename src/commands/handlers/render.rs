//! Shared render command handler

use crate::commands::core::CommandError;
use crate::registry::Entry;
use crate::render::to_dot;
use std::path::Path;

/// Render an entry's automaton as DOT, highlighting the run on `input` if
/// one is given.
pub fn run_render(entry: &Entry, input: Option<&str>) -> String {
    let simulation = input.map(|input| entry.check(input));
    to_dot(&entry.automaton, simulation.as_ref())
}

/// Write DOT text to `path`, creating missing parent directories.
pub fn write_dot(path: &Path, dot: &str) -> Result<(), CommandError> {
    let wrap = |source| CommandError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }
    std::fs::write(path, dot).map_err(wrap)?;

    tracing::debug!(path = %path.display(), bytes = dot.len(), "wrote graph");
    Ok(())
}
