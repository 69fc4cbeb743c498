//! Configuration management for dirpick
//!
//! Defaults for the pick operation and the presentation layer can be kept in
//! a `.dirpick.toml` file. The file is optional; every field falls back to a
//! built-in default.
//!
//! # Lookup
//!
//! 1. The path given with `--config` (must be readable)
//! 2. `.dirpick.toml` in the working directory
//! 3. Built-in defaults
//!
//! `DIRPICK_UI` and `DIRPICK_SKIP_GRID` are applied on top of the file by
//! [`Config::apply_env`], and command-line flags win over both.
//!
//! # File Format
//!
//! ```toml
//! [pick]
//! exclude = ["node_modules", ".*"]
//! exclude_empty = true
//! max_attempts = 3
//! retry_on_cancel = false
//!
//! [ui]
//! preference = "auto"   # auto | rich | plain
//! skip_grid = false
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_MAX_ATTEMPTS, ENV_SKIP_GRID, ENV_UI};
use crate::menu::UiPreference;
use crate::utils;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pick: PickConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Defaults for `dirpick pick`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PickConfig {
    /// Wildcard patterns always excluded, in addition to `--exclude`
    pub exclude: Vec<String>,
    pub exclude_empty: bool,
    pub max_attempts: u32,
    pub retry_on_cancel: bool,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            exclude_empty: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_on_cancel: false,
        }
    }
}

/// Presentation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub preference: UiPreference,
    pub skip_grid: bool,
}

impl Config {
    /// Loads configuration following the lookup order above
    ///
    /// An explicit path that cannot be read or parsed is an error. A broken
    /// file found implicitly only produces a warning and the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            return Self::parse(&content)
                .with_context(|| format!("Failed to parse config file {}", path.display()));
        }

        let local = Path::new(CONFIG_FILE_NAME);
        if !local.is_file() {
            return Ok(Self::default());
        }
        let loaded = std::fs::read_to_string(local)
            .map_err(anyhow::Error::from)
            .and_then(|content| Self::parse(&content));
        match loaded {
            Ok(config) => {
                log::debug!("Loaded configuration from {CONFIG_FILE_NAME}");
                Ok(config)
            }
            Err(e) => {
                utils::print_warning(&format!("Ignoring {CONFIG_FILE_NAME}: {e:#}"));
                Ok(Self::default())
            }
        }
    }

    /// Parses TOML configuration text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Applies `DIRPICK_UI` and `DIRPICK_SKIP_GRID` from the process environment
    pub fn apply_env(self) -> Self {
        self.apply_lookup(|key| env::var(key).ok())
    }

    /// Applies environment overrides through an arbitrary key lookup
    pub fn apply_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_UI).filter(|v| !v.trim().is_empty()) {
            match value.parse::<UiPreference>() {
                Ok(preference) => self.ui.preference = preference,
                Err(e) => utils::print_warning(&format!("Ignoring {ENV_UI}: {e}")),
            }
        }
        if lookup(ENV_SKIP_GRID).is_some_and(|v| utils::is_truthy(&v)) {
            self.ui.skip_grid = true;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.pick.exclude.is_empty());
        assert_eq!(config.pick.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.ui.preference, UiPreference::Auto);
        assert!(!config.ui.skip_grid);
    }

    #[test]
    fn test_parse_partial_file() -> Result<()> {
        let config = Config::parse(
            r#"
            [pick]
            exclude = ["node_modules", ".*"]
            exclude_empty = true

            [ui]
            preference = "plain"
            "#,
        )?;
        assert_eq!(config.pick.exclude, vec!["node_modules", ".*"]);
        assert!(config.pick.exclude_empty);
        assert_eq!(config.pick.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(!config.pick.retry_on_cancel);
        assert_eq!(config.ui.preference, UiPreference::Plain);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_unknown_preference() {
        assert!(Config::parse("[ui]\npreference = \"fancy\"").is_err());
    }

    #[test]
    fn test_load_explicit_path() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[pick]\nmax_attempts = 7\n")?;

        let config = Config::load(Some(&path))?;
        assert_eq!(config.pick.max_attempts, 7);

        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([(ENV_UI, "Rich"), (ENV_SKIP_GRID, "yes")]);
        let config = Config::default().apply_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.ui.preference, UiPreference::Rich);
        assert!(config.ui.skip_grid);
    }

    #[test]
    fn test_invalid_env_value_is_ignored() {
        let vars: HashMap<&str, &str> = HashMap::from([(ENV_UI, "fancy"), (ENV_SKIP_GRID, "0")]);
        let base = Config::parse("[ui]\npreference = \"plain\"\nskip_grid = false").unwrap();
        let config = base.apply_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.ui.preference, UiPreference::Plain);
        assert!(!config.ui.skip_grid);
    }
}
