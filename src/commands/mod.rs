//! Directory selection and creation operations
//!
//! [`SelectionOrchestrator`] ties the pieces together: the filesystem, the
//! menu presenter, the optional grid picker and the automation source. Its
//! operations live in [`pick`](SelectionOrchestrator::pick_directories) and
//! [`create`](SelectionOrchestrator::create_directory).
//!
//! Every collaborator is borrowed, so one process bootstrap can own them and
//! tests can hand in mocks.

mod create;
mod pick;

pub use create::{CreateRequest, CreationOutcome};
pub use pick::PickRequest;

use crate::core::Platform;
use crate::error::Result;
use crate::infrastructure::FileSystem;
use crate::menu::{resolve_automated, AutomationSource, MenuPresenter, MenuResult, MenuSpec, UiPreference};
use crate::ui::GridPicker;

pub struct SelectionOrchestrator<'a> {
    fs: &'a dyn FileSystem,
    presenter: MenuPresenter<'a>,
    grid: Option<&'a dyn GridPicker>,
    automation: &'a dyn AutomationSource,
    platform: Platform,
}

impl<'a> SelectionOrchestrator<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        presenter: MenuPresenter<'a>,
        automation: &'a dyn AutomationSource,
    ) -> Self {
        Self {
            fs,
            presenter,
            grid: None,
            automation,
            platform: Platform::current(),
        }
    }

    /// Tries `grid` before menus when picking directories
    pub fn with_grid(mut self, grid: &'a dyn GridPicker) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Validates names for `platform` instead of the host platform
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Answers a menu from automation when enabled, otherwise asks a person
    pub fn resolve_menu(&self, spec: &MenuSpec, preference: UiPreference) -> Result<MenuResult> {
        let automation = self.automation.current();
        if automation.enabled {
            spec.validate()?;
            return Ok(resolve_automated(spec, &automation));
        }
        self.presenter.present(spec, preference)
    }
}
