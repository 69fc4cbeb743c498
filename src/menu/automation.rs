//! Non-interactive menu answers
//!
//! When automation is enabled every menu is answered from configuration
//! instead of the console. The configuration is a plain value; where it
//! comes from is decided by an [`AutomationSource`], and [`EnvAutomation`]
//! re-reads the environment on every call so that changes between calls
//! are honored.

use std::env;

use super::{MenuMode, MenuResult, MenuSpec};
use crate::constants::{ENV_AUTOMATION, ENV_MENU_SELECTION, ENV_MENU_YESNO};
use crate::utils::is_truthy;

/// Answers used when running without a human
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutomationConfig {
    pub enabled: bool,
    /// Raw comma-separated zero-based indices
    pub selection: Option<String>,
    /// Raw boolean-like answer for yes/no prompts
    pub yes_no: Option<String>,
}

impl AutomationConfig {
    /// Enabled configuration with no answers set
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn with_selection(mut self, selection: &str) -> Self {
        self.selection = Some(selection.to_string());
        self
    }

    pub fn with_yes_no(mut self, answer: &str) -> Self {
        self.yes_no = Some(answer.to_string());
        self
    }

    /// Reads the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            enabled: lookup(ENV_AUTOMATION).is_some_and(|v| is_truthy(&v)),
            selection: lookup(ENV_MENU_SELECTION).filter(|v| !v.trim().is_empty()),
            yes_no: lookup(ENV_MENU_YESNO).filter(|v| !v.trim().is_empty()),
        }
    }

    /// Parsed selection indices in the order given; unparseable tokens are dropped
    pub fn selection_indices(&self) -> Vec<i64> {
        self.selection
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(|token| token.trim().parse::<i64>().ok())
            .collect()
    }

    /// Yes/no answer; true when unset
    pub fn yes_no_answer(&self) -> bool {
        self.yes_no.as_deref().map_or(true, is_truthy)
    }
}

/// Supplies the automation configuration in effect for one menu
pub trait AutomationSource {
    fn current(&self) -> AutomationConfig;
}

impl AutomationSource for AutomationConfig {
    fn current(&self) -> AutomationConfig {
        self.clone()
    }
}

/// Reads the environment afresh on every call
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvAutomation;

impl AutomationSource for EnvAutomation {
    fn current(&self) -> AutomationConfig {
        AutomationConfig::from_env()
    }
}

/// Resolves a menu from configuration without prompting
///
/// # Rules
///
/// - **YesNo**: the configured answer if present (truthy tokens are true,
///   anything else false), otherwise true
/// - **Single/Multiple**: configured indices within range, duplicates
///   dropped, requested order kept. With none left, the menu default is used
///   if set, else the first option, else nothing
///
/// # Examples
///
/// ```rust
/// use dirpick::menu::{resolve_automated, AutomationConfig, MenuResult, MenuSpec};
///
/// let spec = MenuSpec::multiple("Pick", vec!["A".into(), "B".into(), "C".into()]);
/// let config = AutomationConfig::enabled().with_selection("1,0");
/// assert_eq!(
///     resolve_automated(&spec, &config),
///     MenuResult::Multiple(vec!["B".into(), "A".into()])
/// );
/// ```
pub fn resolve_automated(spec: &MenuSpec, config: &AutomationConfig) -> MenuResult {
    if spec.mode == MenuMode::YesNo {
        return MenuResult::YesNo(config.yes_no_answer());
    }

    let count = spec.options.len() as i64;
    let mut indices: Vec<usize> = Vec::new();
    for index in config.selection_indices() {
        if (0..count).contains(&index) && !indices.contains(&(index as usize)) {
            indices.push(index as usize);
        }
    }

    if indices.is_empty() {
        match spec.default_selection {
            Some(default) if default < spec.options.len() => indices.push(default),
            _ if !spec.options.is_empty() => indices.push(0),
            _ => {}
        }
    }

    log::debug!("Automation resolved '{}' to indices {:?}", spec.title, indices);

    let mut chosen = indices.into_iter().map(|i| spec.options[i].clone());
    match spec.mode {
        MenuMode::Single => MenuResult::Single(chosen.next()),
        _ => MenuResult::Multiple(chosen.collect()),
    }
}
