//! Default paths and configuration directory management

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the configuration directory for libdfa
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir().context("Could not determine local data directory")?;
    Ok(base.join("libdfa"))
}

/// Get the default user config path
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Get the config file path with optional override
pub fn config_file_path(custom_path: Option<&Path>) -> Result<PathBuf> {
    match custom_path {
        Some(path) => {
            validate_config_path(path)?;
            Ok(path.to_path_buf())
        }
        None => default_config_path(),
    }
}

/// Validate that a config file path has .json extension
pub fn validate_config_path(path: &Path) -> Result<()> {
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => Ok(()),
        Some(ext) => Err(anyhow::anyhow!(
            "Config file must have .json extension, got .{}. Please use a .json file.",
            ext
        )),
        None => Err(anyhow::anyhow!(
            "Config file must have .json extension. Please add .json to the filename."
        )),
    }
}

/// User configuration stored in config file
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PersistentConfig {
    /// Automaton selected when the REPL starts
    pub default_automaton: Option<String>,
    /// Show the step table after every check
    pub show_steps: Option<bool>,
    /// Directory REPL `render` writes DOT files into
    pub dot_dir: Option<PathBuf>,
}

impl PersistentConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from custom path; a missing file gives defaults
    pub fn load_from(custom_path: Option<&Path>) -> Result<Self> {
        let path = config_file_path(custom_path)?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(None)
    }

    /// Save configuration to custom path
    pub fn save_to(&self, custom_path: Option<&Path>) -> Result<()> {
        let path = config_file_path(custom_path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Merge with command-line options (CLI options take precedence)
    pub fn merge_with_cli(&self, cli: &PersistentConfig) -> Self {
        Self {
            default_automaton: cli
                .default_automaton
                .clone()
                .or_else(|| self.default_automaton.clone()),
            show_steps: cli.show_steps.or(self.show_steps),
            dot_dir: cli.dot_dir.clone().or_else(|| self.dot_dir.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_cli() {
        let stored = PersistentConfig {
            default_automaton: Some("a".to_string()),
            show_steps: Some(false),
            dot_dir: Some(PathBuf::from("/tmp/graphs")),
        };
        let cli = PersistentConfig {
            default_automaton: Some("b".to_string()),
            show_steps: None,
            dot_dir: None,
        };

        let merged = stored.merge_with_cli(&cli);
        assert_eq!(merged.default_automaton.as_deref(), Some("b"));
        assert_eq!(merged.show_steps, Some(false));
        assert_eq!(merged.dot_dir, Some(PathBuf::from("/tmp/graphs")));
    }

    #[test]
    fn test_validate_config_path() {
        assert!(validate_config_path(Path::new("settings.json")).is_ok());
        assert!(validate_config_path(Path::new("settings.toml")).is_err());
        assert!(validate_config_path(Path::new("settings")).is_err());
    }

    #[test]
    fn test_partial_config_file() {
        let config: PersistentConfig = serde_json::from_str(r#"{"show_steps": true}"#).unwrap();
        assert_eq!(config.show_steps, Some(true));
        assert_eq!(config.default_automaton, None);
    }
}
