//! Menu descriptions and their presentation
//!
//! A [`MenuSpec`] describes what to ask; a [`MenuPresenter`] decides how to
//! ask it. Presentation has two strategies behind [`MenuStrategy`]:
//!
//! - **Rich**: styled prompts through a [`RichConsole`], wrapped so that any
//!   failure is reported and redispatched to the plain strategy
//! - **Plain**: numbered text menus read line by line (see [`plain`])
//!
//! Automated answers ([`automation`]) bypass presentation entirely and are
//! consulted by the caller before a presenter is involved.

pub mod automation;
pub mod capability;
pub mod plain;

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_CANCEL_LABEL, DEFAULT_MARKER, MARKUP_CLOSE, MARKUP_DIM_OPEN, MAX_CANCEL_LABEL_LENGTH,
    MAX_TITLE_LENGTH, WARNING_RICH_FAILED, WARNING_RICH_UNAVAILABLE,
};
use crate::error::{Result, SelectionError};
use crate::ui::{escape_markup, RichConsole};
use crate::utils;

pub use automation::{resolve_automated, AutomationConfig, AutomationSource, EnvAutomation};
pub use capability::CapabilityState;
pub use plain::{LineSource, PlainMenu, ScriptedInput, SharedBuffer, StdinLines};

/// Kind of answer a menu asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuMode {
    Single,
    Multiple,
    YesNo,
}

/// Description of one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSpec {
    pub title: String,
    pub options: Vec<String>,
    pub mode: MenuMode,
    /// Zero-based index of the preselected option (single mode only)
    pub default_selection: Option<usize>,
    pub cancel_label: String,
}

impl MenuSpec {
    fn new(title: impl Into<String>, options: Vec<String>, mode: MenuMode) -> Self {
        Self {
            title: title.into(),
            options,
            mode,
            default_selection: None,
            cancel_label: DEFAULT_CANCEL_LABEL.to_string(),
        }
    }

    pub fn single(title: impl Into<String>, options: Vec<String>) -> Self {
        Self::new(title, options, MenuMode::Single)
    }

    pub fn multiple(title: impl Into<String>, options: Vec<String>) -> Self {
        Self::new(title, options, MenuMode::Multiple)
    }

    pub fn yes_no(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new(), MenuMode::YesNo)
    }

    pub fn with_default(mut self, index: usize) -> Self {
        self.default_selection = Some(index);
        self
    }

    pub fn with_cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label.into();
        self
    }

    /// Checks the description's invariants
    ///
    /// A violation is a caller bug and is reported as
    /// [`SelectionError::InvalidMenu`].
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(SelectionError::InvalidMenu(msg));

        let title_len = self.title.chars().count();
        if title_len == 0 || title_len > MAX_TITLE_LENGTH {
            return invalid(format!("title must be 1-{MAX_TITLE_LENGTH} characters"));
        }
        let label_len = self.cancel_label.chars().count();
        if label_len == 0 || label_len > MAX_CANCEL_LABEL_LENGTH {
            return invalid(format!(
                "cancel label must be 1-{MAX_CANCEL_LABEL_LENGTH} characters"
            ));
        }

        match self.mode {
            MenuMode::YesNo if !self.options.is_empty() => {
                return invalid("yes/no menus take no options".into());
            }
            MenuMode::Single | MenuMode::Multiple if self.options.is_empty() => {
                return invalid("at least one option is required".into());
            }
            _ => {}
        }

        match self.default_selection {
            Some(_) if self.mode != MenuMode::Single => {
                invalid("a default selection is only allowed for single selection".into())
            }
            Some(index) if index >= self.options.len() => invalid(format!(
                "default selection {index} is out of range for {} options",
                self.options.len()
            )),
            _ => Ok(()),
        }
    }
}

/// Answer to a menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuResult {
    /// Chosen option, `None` when cancelled
    Single(Option<String>),
    /// Chosen options, empty when cancelled
    Multiple(Vec<String>),
    YesNo(bool),
}

impl MenuResult {
    /// Selected options as a list; yes/no answers select nothing
    pub fn selected(&self) -> Vec<String> {
        match self {
            Self::Single(choice) => choice.iter().cloned().collect(),
            Self::Multiple(choices) => choices.clone(),
            Self::YesNo(_) => Vec::new(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::YesNo(answer) => Some(*answer),
            _ => None,
        }
    }
}

/// Requested presentation style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UiPreference {
    #[default]
    Auto,
    Rich,
    Plain,
}

impl FromStr for UiPreference {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "rich" => Ok(Self::Rich),
            "plain" => Ok(Self::Plain),
            other => Err(SelectionError::InvalidArgument(format!(
                "unknown UI preference '{other}' (expected auto, rich or plain)"
            ))),
        }
    }
}

impl fmt::Display for UiPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Rich => write!(f, "rich"),
            Self::Plain => write!(f, "plain"),
        }
    }
}

/// Presentation actually used for one call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiStrategy {
    Rich,
    Plain,
}

/// One way of presenting a menu
pub trait MenuStrategy {
    fn present(&self, spec: &MenuSpec) -> Result<MenuResult>;
}

/// Styled prompts through the rich console
pub struct RichMenu<'a> {
    console: &'a dyn RichConsole,
}

impl<'a> RichMenu<'a> {
    pub fn new(console: &'a dyn RichConsole) -> Self {
        Self { console }
    }

    fn labels(spec: &MenuSpec) -> Vec<String> {
        spec.options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let label = escape_markup(option);
                if spec.default_selection == Some(i) {
                    format!("{label} {MARKUP_DIM_OPEN}{DEFAULT_MARKER}{MARKUP_CLOSE}")
                } else {
                    label
                }
            })
            .collect()
    }
}

fn presentation_failure(err: anyhow::Error) -> SelectionError {
    SelectionError::PresentationFailure(format!("{err:#}"))
}

impl MenuStrategy for RichMenu<'_> {
    fn present(&self, spec: &MenuSpec) -> Result<MenuResult> {
        let title = escape_markup(&spec.title);
        let count = spec.options.len();

        match spec.mode {
            MenuMode::Single => {
                let mut items = Self::labels(spec);
                items.push(escape_markup(&spec.cancel_label));
                let chosen = self
                    .console
                    .prompt_single(&title, &items, spec.default_selection)
                    .map_err(presentation_failure)?;
                match chosen {
                    Some(i) if i < count => Ok(MenuResult::Single(Some(spec.options[i].clone()))),
                    Some(i) if i == count => Ok(MenuResult::Single(None)),
                    None => Ok(MenuResult::Single(None)),
                    Some(i) => Err(SelectionError::PresentationFailure(format!(
                        "rich console returned index {i} for {count} options"
                    ))),
                }
            }
            MenuMode::Multiple => {
                let chosen = self
                    .console
                    .prompt_multiple(&title, &Self::labels(spec))
                    .map_err(presentation_failure)?;
                let mut indices = chosen.unwrap_or_default();
                indices.sort_unstable();
                indices.dedup();
                if let Some(&i) = indices.iter().find(|&&i| i >= count) {
                    return Err(SelectionError::PresentationFailure(format!(
                        "rich console returned index {i} for {count} options"
                    )));
                }
                Ok(MenuResult::Multiple(
                    indices.into_iter().map(|i| spec.options[i].clone()).collect(),
                ))
            }
            MenuMode::YesNo => Ok(MenuResult::YesNo(
                self.console
                    .prompt_confirm(&title, true)
                    .map_err(presentation_failure)?,
            )),
        }
    }
}

/// Runs `primary`, redispatching to `fallback` when it fails
///
/// Caller faults are not presentation problems and pass through untouched.
pub struct WithFallback<'a> {
    primary: &'a dyn MenuStrategy,
    fallback: &'a dyn MenuStrategy,
}

impl<'a> WithFallback<'a> {
    pub fn new(primary: &'a dyn MenuStrategy, fallback: &'a dyn MenuStrategy) -> Self {
        Self { primary, fallback }
    }
}

impl MenuStrategy for WithFallback<'_> {
    fn present(&self, spec: &MenuSpec) -> Result<MenuResult> {
        match self.primary.present(spec) {
            Err(e) if !e.is_caller_fault() => {
                log::debug!("Rich presentation of '{}' failed: {e}", spec.title);
                utils::print_warning(WARNING_RICH_FAILED);
                self.fallback.present(spec)
            }
            other => other,
        }
    }
}

/// Presents menus to a person, choosing between rich and plain output
pub struct MenuPresenter<'a> {
    console: &'a dyn RichConsole,
    capability: &'a CapabilityState,
    plain: PlainMenu<'a>,
}

impl<'a> MenuPresenter<'a> {
    pub fn new(
        console: &'a dyn RichConsole,
        capability: &'a CapabilityState,
        plain: PlainMenu<'a>,
    ) -> Self {
        Self {
            console,
            capability,
            plain,
        }
    }

    /// Picks the strategy for a preference, warning when rich was requested
    /// but cannot be used
    pub fn resolve_strategy(&self, preference: UiPreference) -> UiStrategy {
        match preference {
            UiPreference::Plain => UiStrategy::Plain,
            UiPreference::Auto => {
                if self.capability.rich_available(self.console) {
                    UiStrategy::Rich
                } else {
                    UiStrategy::Plain
                }
            }
            UiPreference::Rich => {
                if self.capability.rich_available(self.console) {
                    UiStrategy::Rich
                } else {
                    utils::print_warning(WARNING_RICH_UNAVAILABLE);
                    UiStrategy::Plain
                }
            }
        }
    }

    /// Validates `spec` and presents it
    pub fn present(&self, spec: &MenuSpec, preference: UiPreference) -> Result<MenuResult> {
        spec.validate()?;
        match self.resolve_strategy(preference) {
            UiStrategy::Rich => {
                let rich = RichMenu::new(self.console);
                WithFallback::new(&rich, &self.plain).present(spec)
            }
            UiStrategy::Plain => self.plain.present(spec),
        }
    }

    /// Asks for a line of free text; `None` when dismissed or left blank
    pub fn prompt_text(&self, title: &str, preference: UiPreference) -> Result<Option<String>> {
        if self.resolve_strategy(preference) == UiStrategy::Rich {
            match self.console.prompt_text(&escape_markup(title)) {
                Ok(text) => return Ok(text),
                Err(e) => {
                    log::debug!("Rich text prompt failed: {e:#}");
                    utils::print_warning(WARNING_RICH_FAILED);
                }
            }
        }
        self.plain.read_text(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockConsole;

    fn abc() -> Vec<String> {
        vec!["A".into(), "B".into(), "C".into()]
    }

    fn plain_with<'a>(lines: &[&str]) -> (PlainMenu<'a>, SharedBuffer) {
        let out = SharedBuffer::new();
        let menu = PlainMenu::new(Box::new(ScriptedInput::new(lines)), Box::new(out.clone()));
        (menu, out)
    }

    #[test]
    fn test_validate_rejects_bad_specs() {
        let long_title = "t".repeat(MAX_TITLE_LENGTH + 1);
        let cases = vec![
            MenuSpec::single("", abc()),
            MenuSpec::single(long_title, abc()),
            MenuSpec::single("t", vec![]),
            MenuSpec::multiple("t", vec![]),
            MenuSpec::single("t", abc()).with_default(3),
            MenuSpec::multiple("t", abc()).with_default(0),
            MenuSpec::single("t", abc()).with_cancel_label(""),
            MenuSpec::single("t", abc()).with_cancel_label("x".repeat(101)),
            MenuSpec {
                options: abc(),
                ..MenuSpec::yes_no("t")
            },
        ];
        for spec in cases {
            assert!(
                matches!(spec.validate(), Err(SelectionError::InvalidMenu(_))),
                "{spec:?} should be invalid"
            );
        }
    }

    #[test]
    fn test_validate_accepts_good_specs() {
        assert!(MenuSpec::single("t", abc()).with_default(2).validate().is_ok());
        assert!(MenuSpec::multiple("t", abc()).validate().is_ok());
        assert!(MenuSpec::yes_no("t").validate().is_ok());
    }

    #[test]
    fn test_ui_preference_from_str() {
        assert_eq!("Rich".parse::<UiPreference>().ok(), Some(UiPreference::Rich));
        assert_eq!(" plain ".parse::<UiPreference>().ok(), Some(UiPreference::Plain));
        assert!("fancy".parse::<UiPreference>().is_err());
    }

    #[test]
    fn test_resolve_strategy() {
        let state = CapabilityState::new();
        let console = MockConsole::new().available(false);
        let (plain, _) = plain_with(&[]);
        let presenter = MenuPresenter::new(&console, &state, plain);

        assert_eq!(presenter.resolve_strategy(UiPreference::Plain), UiStrategy::Plain);
        assert_eq!(presenter.resolve_strategy(UiPreference::Auto), UiStrategy::Plain);
        assert_eq!(presenter.resolve_strategy(UiPreference::Rich), UiStrategy::Plain);

        console.set_available(true);
        state.reset();
        assert_eq!(presenter.resolve_strategy(UiPreference::Auto), UiStrategy::Rich);
        assert_eq!(presenter.resolve_strategy(UiPreference::Plain), UiStrategy::Plain);
    }

    #[test]
    fn test_rich_single_escapes_labels_and_marks_default() -> Result<()> {
        let state = CapabilityState::new();
        let console = MockConsole::new().with_single(Some(0));
        let (plain, _) = plain_with(&[]);
        let presenter = MenuPresenter::new(&console, &state, plain);
        let spec = MenuSpec::single("t", vec!["x[1]".into(), "y".into()]).with_default(1);

        let result = presenter.present(&spec, UiPreference::Auto)?;

        assert_eq!(result, MenuResult::Single(Some("x[1]".into())));
        assert_eq!(
            console.shown_items()[0],
            vec![
                "x[[1]]".to_string(),
                "y [dim](default)[/]".to_string(),
                "Cancel".to_string()
            ]
        );
        Ok(())
    }

    #[test]
    fn test_rich_single_cancel_item() -> Result<()> {
        let state = CapabilityState::new();
        let console = MockConsole::new().with_single(Some(3)).with_single(None);
        let (plain, _) = plain_with(&[]);
        let presenter = MenuPresenter::new(&console, &state, plain);
        let spec = MenuSpec::single("t", abc());

        assert_eq!(presenter.present(&spec, UiPreference::Rich)?, MenuResult::Single(None));
        assert_eq!(presenter.present(&spec, UiPreference::Rich)?, MenuResult::Single(None));
        Ok(())
    }

    #[test]
    fn test_rich_multiple_returns_index_order() -> Result<()> {
        let state = CapabilityState::new();
        let console = MockConsole::new().with_multiple(Some(vec![2, 0]));
        let (plain, _) = plain_with(&[]);
        let presenter = MenuPresenter::new(&console, &state, plain);

        let result = presenter.present(&MenuSpec::multiple("t", abc()), UiPreference::Auto)?;
        assert_eq!(result, MenuResult::Multiple(vec!["A".into(), "C".into()]));
        Ok(())
    }

    #[test]
    fn test_rich_failure_falls_back_to_plain_for_every_mode() -> Result<()> {
        let state = CapabilityState::new();
        // No responses configured: every rich prompt fails
        let console = MockConsole::new();
        let (plain, _) = plain_with(&["2", "1,3", "n"]);
        let presenter = MenuPresenter::new(&console, &state, plain);

        assert_eq!(
            presenter.present(&MenuSpec::single("t", abc()), UiPreference::Rich)?,
            MenuResult::Single(Some("B".into()))
        );
        assert_eq!(
            presenter.present(&MenuSpec::multiple("t", abc()), UiPreference::Rich)?,
            MenuResult::Multiple(vec!["A".into(), "C".into()])
        );
        assert_eq!(
            presenter.present(&MenuSpec::yes_no("t"), UiPreference::Rich)?,
            MenuResult::YesNo(false)
        );
        Ok(())
    }

    #[test]
    fn test_invalid_spec_is_not_presented() {
        let state = CapabilityState::new();
        let console = MockConsole::new().with_single(Some(0));
        let (plain, _) = plain_with(&["1"]);
        let presenter = MenuPresenter::new(&console, &state, plain);

        let spec = MenuSpec::single("t", abc()).with_default(7);
        assert!(matches!(
            presenter.present(&spec, UiPreference::Auto),
            Err(SelectionError::InvalidMenu(_))
        ));
        assert!(!console.is_exhausted());
        assert_eq!(console.probe_count(), 0);
    }

    #[test]
    fn test_prompt_text_falls_back_to_plain() -> Result<()> {
        let state = CapabilityState::new();
        let console = MockConsole::new().with_text(Some("rich-name"));
        let (plain, _) = plain_with(&["plain-name"]);
        let presenter = MenuPresenter::new(&console, &state, plain);

        assert_eq!(
            presenter.prompt_text("Name", UiPreference::Auto)?,
            Some("rich-name".into())
        );
        // Console has no more texts, so the plain reader answers
        assert_eq!(
            presenter.prompt_text("Name", UiPreference::Auto)?,
            Some("plain-name".into())
        );
        Ok(())
    }

    #[test]
    fn test_menu_result_helpers() {
        assert_eq!(MenuResult::Single(Some("a".into())).selected(), vec!["a"]);
        assert!(MenuResult::Single(None).selected().is_empty());
        assert_eq!(MenuResult::YesNo(true).as_bool(), Some(true));
        assert_eq!(MenuResult::Multiple(vec![]).as_bool(), None);
    }
}
