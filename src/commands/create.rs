use std::path::{Path, PathBuf};

use super::SelectionOrchestrator;
use crate::constants::{
    ERROR_ALREADY_EXISTS, ERROR_CREATE_FAILED, ERROR_INVALID_NAME, ERROR_PARENT_NOT_FOUND,
    INFO_CREATING, INFO_DRY_RUN, NAME_PROMPT_MAX_ATTEMPTS, PROMPT_DIRECTORY_NAME, PROMPT_USE_NAME,
    SUCCESS_CREATED, WARNING_ATTEMPTS_EXHAUSTED, WARNING_AUTOMATION_NO_NAME,
};
use crate::core::{validate_directory_name, NameRejection};
use crate::error::SelectionError;
use crate::menu::{MenuResult, MenuSpec, UiPreference};
use crate::utils;

/// Options for one create operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateRequest {
    pub parent: PathBuf,
    /// Name to create; prompted for when unset
    pub name: Option<String>,
    /// Validate and report without touching the filesystem
    pub dry_run: bool,
    pub ui: UiPreference,
}

impl CreateRequest {
    pub fn new(parent: impl Into<PathBuf>) -> Self {
        Self {
            parent: parent.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// What a create operation ended with
///
/// Only `Created` carries a usable handle; every other variant has already
/// been reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationOutcome {
    Created(PathBuf),
    /// Dry run: the directory would have been created here
    DryRun(PathBuf),
    AlreadyExists(PathBuf),
    ParentNotFound(PathBuf),
    Rejected(NameRejection),
    Cancelled,
    Failed(String),
}

impl CreationOutcome {
    /// Path of the newly created directory
    pub fn handle(&self) -> Option<&Path> {
        match self {
            Self::Created(path) => Some(path),
            _ => None,
        }
    }

    /// Path that was or would have been created
    pub fn target(&self) -> Option<&Path> {
        match self {
            Self::Created(path) | Self::DryRun(path) => Some(path),
            _ => None,
        }
    }
}

impl SelectionOrchestrator<'_> {
    /// Creates a validated directory under `request.parent`
    ///
    /// Never fails: every problem is reported and folded into the outcome.
    pub fn create_directory(&self, request: &CreateRequest) -> CreationOutcome {
        let parent = &request.parent;
        if !self.fs.is_dir(parent) {
            utils::print_error(&ERROR_PARENT_NOT_FOUND.replace("{}", &parent.display().to_string()));
            return CreationOutcome::ParentNotFound(parent.clone());
        }

        let proposed = match &request.name {
            Some(name) => name.clone(),
            None => match self.prompt_directory_name(parent, request.ui) {
                Some(name) => name,
                None => return CreationOutcome::Cancelled,
            },
        };

        let name = match validate_directory_name(&proposed, self.platform) {
            Ok(name) => name,
            Err(rejection) => {
                utils::print_error(&ERROR_INVALID_NAME.replace("{}", &rejection.to_string()));
                return CreationOutcome::Rejected(rejection);
            }
        };

        let target = parent.join(&name);
        let shown = target.display().to_string();
        if self.fs.exists(&target) {
            utils::print_warning(&ERROR_ALREADY_EXISTS.replace("{}", &shown));
            return CreationOutcome::AlreadyExists(target);
        }

        if request.dry_run {
            utils::print_info(&INFO_DRY_RUN.replace("{}", &shown));
            return CreationOutcome::DryRun(target);
        }

        let pb = utils::spinner(INFO_CREATING);
        let created = self.fs.create_dir(&target);
        pb.finish_and_clear();

        match created {
            Ok(()) => {
                log::info!("Created {shown}");
                utils::print_success(&SUCCESS_CREATED.replace("{}", &shown));
                CreationOutcome::Created(target)
            }
            Err(e) => match e.downcast_ref::<SelectionError>() {
                Some(SelectionError::AlreadyExists(_)) => {
                    utils::print_warning(&ERROR_ALREADY_EXISTS.replace("{}", &shown));
                    CreationOutcome::AlreadyExists(target)
                }
                _ => {
                    let message = format!("{e:#}");
                    utils::print_error(&ERROR_CREATE_FAILED.replace("{}", &message));
                    CreationOutcome::Failed(message)
                }
            },
        }
    }

    /// Asks for a new directory name until one is valid and confirmed
    ///
    /// Each proposal is validated, checked against existing entries of
    /// `parent` and confirmed before it is accepted. Returns `None` when the
    /// user dismisses the prompt, input fails, automation is on (there is no
    /// automated free-text answer) or the attempts run out.
    pub fn prompt_directory_name(&self, parent: &Path, ui: UiPreference) -> Option<String> {
        if self.automation.current().enabled {
            utils::print_warning(WARNING_AUTOMATION_NO_NAME);
            return None;
        }

        for attempt in 1..=NAME_PROMPT_MAX_ATTEMPTS {
            let input = match self.presenter.prompt_text(PROMPT_DIRECTORY_NAME, ui) {
                Ok(Some(input)) => input,
                Ok(None) => return None,
                Err(e) => {
                    utils::print_warning(&format!("Cannot read a directory name: {e}"));
                    return None;
                }
            };

            let name = match validate_directory_name(&input, self.platform) {
                Ok(name) => name,
                Err(rejection) => {
                    utils::print_error(&ERROR_INVALID_NAME.replace("{}", &rejection.to_string()));
                    continue;
                }
            };

            let target = parent.join(&name);
            if self.fs.exists(&target) {
                utils::print_warning(
                    &ERROR_ALREADY_EXISTS.replace("{}", &target.display().to_string()),
                );
                continue;
            }

            let confirm = MenuSpec::yes_no(PROMPT_USE_NAME.replace("{}", &name));
            match self.presenter.present(&confirm, ui) {
                Ok(MenuResult::YesNo(true)) => return Some(name),
                Ok(_) => log::debug!("Name '{name}' declined on attempt {attempt}"),
                Err(e) => {
                    utils::print_warning(&format!("Cannot confirm the directory name: {e}"));
                    return None;
                }
            }
        }

        utils::print_warning(
            &WARNING_ATTEMPTS_EXHAUSTED.replace("{}", &NAME_PROMPT_MAX_ATTEMPTS.to_string()),
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Platform;
    use crate::infrastructure::filesystem::mock::MockFileSystem;
    use crate::infrastructure::FileSystem;
    use crate::menu::{
        AutomationConfig, CapabilityState, MenuPresenter, PlainMenu, ScriptedInput, SharedBuffer,
    };
    use crate::ui::MockConsole;

    fn parent_fs() -> MockFileSystem {
        MockFileSystem::new()
            .with_directory("/p")
            .with_directory("/p/taken")
    }

    fn plain<'a>(lines: &[&str]) -> PlainMenu<'a> {
        PlainMenu::new(Box::new(ScriptedInput::new(lines)), Box::new(SharedBuffer::new()))
    }

    #[test]
    fn test_create_then_already_exists() {
        let fs = parent_fs();
        let console = MockConsole::new().available(false);
        let state = CapabilityState::new();
        let automation = AutomationConfig::default();
        let orch = SelectionOrchestrator::new(
            &fs,
            MenuPresenter::new(&console, &state, plain(&[])),
            &automation,
        );

        let request = CreateRequest::new("/p").with_name("reports");
        let first = orch.create_directory(&request);
        assert_eq!(first, CreationOutcome::Created(PathBuf::from("/p/reports")));
        assert_eq!(first.handle(), Some(Path::new("/p/reports")));

        let second = orch.create_directory(&request);
        assert_eq!(second, CreationOutcome::AlreadyExists(PathBuf::from("/p/reports")));
        assert_eq!(second.handle(), None);
    }

    #[test]
    fn test_dry_run_creates_nothing() {
        let fs = parent_fs();
        let console = MockConsole::new();
        let state = CapabilityState::new();
        let automation = AutomationConfig::default();
        let orch = SelectionOrchestrator::new(
            &fs,
            MenuPresenter::new(&console, &state, plain(&[])),
            &automation,
        );

        let request = CreateRequest {
            dry_run: true,
            ..CreateRequest::new("/p").with_name(" drafts ")
        };
        let outcome = orch.create_directory(&request);
        assert_eq!(outcome, CreationOutcome::DryRun(PathBuf::from("/p/drafts")));
        assert_eq!(outcome.target(), Some(Path::new("/p/drafts")));
        assert!(!fs.exists(Path::new("/p/drafts")));
    }

    #[test]
    fn test_missing_parent() {
        let fs = parent_fs();
        let console = MockConsole::new();
        let state = CapabilityState::new();
        let automation = AutomationConfig::default();
        let orch = SelectionOrchestrator::new(
            &fs,
            MenuPresenter::new(&console, &state, plain(&[])),
            &automation,
        );

        assert_eq!(
            orch.create_directory(&CreateRequest::new("/nope").with_name("x")),
            CreationOutcome::ParentNotFound(PathBuf::from("/nope"))
        );
    }

    #[test]
    fn test_rejected_names_follow_platform() {
        let fs = parent_fs();
        let console = MockConsole::new();
        let state = CapabilityState::new();
        let automation = AutomationConfig::default();
        let windows = SelectionOrchestrator::new(
            &fs,
            MenuPresenter::new(&console, &state, plain(&[])),
            &automation,
        )
        .with_platform(Platform::Windows);

        assert_eq!(
            windows.create_directory(&CreateRequest::new("/p").with_name("a/b")),
            CreationOutcome::Rejected(NameRejection::InvalidCharacters)
        );
        assert_eq!(
            windows.create_directory(&CreateRequest::new("/p").with_name("con ")),
            CreationOutcome::Rejected(NameRejection::ReservedDeviceName)
        );

        let unix = SelectionOrchestrator::new(
            &fs,
            MenuPresenter::new(&console, &state, plain(&[])),
            &automation,
        )
        .with_platform(Platform::Unix);
        assert_eq!(
            unix.create_directory(&CreateRequest::new("/p").with_name("CON")),
            CreationOutcome::Created(PathBuf::from("/p/CON"))
        );
    }

    #[test]
    fn test_filesystem_failure_is_reported_not_raised() {
        let fs = parent_fs().with_failure("/p/locked", "permission denied");
        let console = MockConsole::new();
        let state = CapabilityState::new();
        let automation = AutomationConfig::default();
        let orch = SelectionOrchestrator::new(
            &fs,
            MenuPresenter::new(&console, &state, plain(&[])),
            &automation,
        );

        match orch.create_directory(&CreateRequest::new("/p").with_name("locked")) {
            CreationOutcome::Failed(message) => assert!(message.contains("permission denied")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn test_prompted_name_is_validated_and_confirmed() {
        let fs = parent_fs();
        let console = MockConsole::new().available(false);
        let state = CapabilityState::new();
        let automation = AutomationConfig::default();
        let orch = SelectionOrchestrator::new(
            &fs,
            MenuPresenter::new(
                &console,
                &state,
                plain(&["bad/name", "taken", "first", "n", "second", "y"]),
            ),
            &automation,
        );

        assert_eq!(
            orch.create_directory(&CreateRequest::new("/p")),
            CreationOutcome::Created(PathBuf::from("/p/second"))
        );
    }

    #[test]
    fn test_blank_name_cancels() {
        let fs = parent_fs();
        let console = MockConsole::new().available(false);
        let state = CapabilityState::new();
        let automation = AutomationConfig::default();
        let orch = SelectionOrchestrator::new(
            &fs,
            MenuPresenter::new(&console, &state, plain(&["  "])),
            &automation,
        );

        assert_eq!(
            orch.create_directory(&CreateRequest::new("/p")),
            CreationOutcome::Cancelled
        );
    }

    #[test]
    fn test_name_prompt_gives_up_after_max_attempts() {
        let fs = parent_fs();
        let console = MockConsole::new().available(false);
        let state = CapabilityState::new();
        let automation = AutomationConfig::default();
        let orch = SelectionOrchestrator::new(
            &fs,
            MenuPresenter::new(&console, &state, plain(&[".", "..", "a/b", "taken", "x", "n", "late"])),
            &automation,
        );

        assert_eq!(orch.prompt_directory_name(Path::new("/p"), UiPreference::Plain), None);
    }

    #[test]
    fn test_automation_without_name_cancels() {
        let fs = parent_fs();
        let console = MockConsole::new();
        let state = CapabilityState::new();
        let automation = AutomationConfig::enabled();
        let orch = SelectionOrchestrator::new(
            &fs,
            MenuPresenter::new(&console, &state, plain(&["ignored", "y"])),
            &automation,
        );

        assert_eq!(
            orch.create_directory(&CreateRequest::new("/p")),
            CreationOutcome::Cancelled
        );
        assert_eq!(
            orch.create_directory(&CreateRequest::new("/p").with_name("auto")),
            CreationOutcome::Created(PathBuf::from("/p/auto"))
        );
    }

    #[test]
    fn test_rich_name_prompt() {
        let fs = parent_fs();
        let console = MockConsole::new()
            .with_text(Some("styled"))
            .with_confirm(true);
        let state = CapabilityState::new();
        let automation = AutomationConfig::default();
        let orch = SelectionOrchestrator::new(
            &fs,
            MenuPresenter::new(&console, &state, plain(&[])),
            &automation,
        );

        assert_eq!(
            orch.create_directory(&CreateRequest::new("/p")),
            CreationOutcome::Created(PathBuf::from("/p/styled"))
        );
        assert!(console.is_exhausted());
    }
}
