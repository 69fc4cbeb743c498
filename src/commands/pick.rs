use std::path::PathBuf;

use super::SelectionOrchestrator;
use crate::constants::{
    DEFAULT_MAX_ATTEMPTS, PROMPT_SELECT_DIRECTORIES, PROMPT_SELECT_DIRECTORY, PROMPT_TRY_AGAIN,
    WARNING_ATTEMPTS_EXHAUSTED, WARNING_BASE_NOT_FOUND, WARNING_GRID_FAILED, WARNING_NO_DIRECTORIES,
};
use crate::core::{filter_directories, DirectoryCandidate, ExclusionPatterns};
use crate::error::{Result, SelectionError};
use crate::menu::{resolve_automated, MenuResult, MenuSpec, UiPreference};
use crate::ui::GridRow;
use crate::utils;

/// Options for one pick operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRequest {
    pub base: PathBuf,
    /// Wildcard patterns matched against directory names
    pub exclude: Vec<String>,
    pub exclude_empty: bool,
    pub multiple: bool,
    /// Offer to try again when nothing was selected
    pub retry_on_cancel: bool,
    pub max_attempts: u32,
    /// Menu title; a default matching `multiple` is used when unset
    pub title: Option<String>,
    pub ui: UiPreference,
    pub skip_grid: bool,
}

impl PickRequest {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            exclude: Vec::new(),
            exclude_empty: false,
            multiple: false,
            retry_on_cancel: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            title: None,
            ui: UiPreference::Auto,
            skip_grid: false,
        }
    }

    fn menu_spec(&self, names: Vec<String>) -> MenuSpec {
        let default_title = if self.multiple {
            PROMPT_SELECT_DIRECTORIES
        } else {
            PROMPT_SELECT_DIRECTORY
        };
        let title = self.title.clone().unwrap_or_else(|| default_title.to_string());
        if self.multiple {
            MenuSpec::multiple(title, names)
        } else {
            MenuSpec::single(title, names)
        }
    }
}

impl SelectionOrchestrator<'_> {
    /// Lets the user pick one or more subdirectories of `request.base`
    ///
    /// Returns the chosen directories in selection order. A missing base,
    /// an empty listing, a cancel and exhausted attempts all produce an empty
    /// list after a warning. Only caller faults are errors: a zero attempt
    /// limit, an invalid exclusion pattern or a title that does not fit a menu.
    pub fn pick_directories(&self, request: &PickRequest) -> Result<Vec<DirectoryCandidate>> {
        if request.max_attempts == 0 {
            return Err(SelectionError::InvalidArgument(
                "max attempts must be at least 1".into(),
            ));
        }

        let excludes =
            ExclusionPatterns::new(&request.exclude, self.platform.is_case_insensitive())?;

        if !self.fs.is_dir(&request.base) {
            let base = request.base.display().to_string();
            utils::print_warning(&WARNING_BASE_NOT_FOUND.replace("{}", &base));
            return Ok(Vec::new());
        }

        let candidates = self.list_candidates(request, &excludes);
        if candidates.is_empty() {
            let base = request.base.display().to_string();
            utils::print_warning(&WARNING_NO_DIRECTORIES.replace("{}", &base));
            return Ok(Vec::new());
        }

        let spec = request.menu_spec(candidates.iter().map(|c| c.name.clone()).collect());
        spec.validate()?;

        for attempt in 1..=request.max_attempts {
            match self.select_once(&spec, &candidates, request) {
                Ok(names) if !names.is_empty() => {
                    log::debug!("Selected {names:?} on attempt {attempt}");
                    return Ok(names
                        .iter()
                        .filter_map(|name| candidates.iter().find(|c| &c.name == name))
                        .cloned()
                        .collect());
                }
                Ok(_) if !request.retry_on_cancel => return Ok(Vec::new()),
                Ok(_) if attempt == request.max_attempts => {}
                Ok(_) => {
                    if !self.confirm_retry(request.ui) {
                        return Ok(Vec::new());
                    }
                }
                Err(e) if e.is_caller_fault() => return Err(e),
                Err(e) => {
                    utils::print_warning(&format!("Selection attempt {attempt} failed: {e}"));
                }
            }
        }

        utils::print_warning(
            &WARNING_ATTEMPTS_EXHAUSTED.replace("{}", &request.max_attempts.to_string()),
        );
        Ok(Vec::new())
    }

    fn list_candidates(
        &self,
        request: &PickRequest,
        excludes: &ExclusionPatterns,
    ) -> Vec<DirectoryCandidate> {
        let listing = match self.fs.list_directories(&request.base) {
            Ok(listing) => listing,
            Err(e) => {
                utils::print_warning(&format!(
                    "Cannot list {}: {e:#}",
                    request.base.display()
                ));
                return Vec::new();
            }
        };
        for skipped in &listing.skipped {
            utils::print_warning(&format!("Skipping {skipped}"));
        }

        let candidates = listing
            .entries
            .into_iter()
            .map(DirectoryCandidate::from)
            .collect();
        filter_directories(candidates, excludes, request.exclude_empty, self.fs)
    }

    /// One attempt: automation, then the grid, then a menu
    fn select_once(
        &self,
        spec: &MenuSpec,
        candidates: &[DirectoryCandidate],
        request: &PickRequest,
    ) -> Result<Vec<String>> {
        let automation = self.automation.current();
        if automation.enabled {
            return Ok(resolve_automated(spec, &automation).selected());
        }

        if !request.skip_grid {
            if let Some(grid) = self.grid.filter(|g| g.is_available()) {
                let rows: Vec<GridRow> = candidates
                    .iter()
                    .map(|c| GridRow {
                        name: c.name.clone(),
                        path: c.path.display().to_string(),
                    })
                    .collect();
                match grid.pick(&spec.title, &rows, request.multiple) {
                    Ok(picked) => {
                        let mut names: Vec<String> = Vec::new();
                        for i in picked.unwrap_or_default() {
                            if let Some(row) = rows.get(i) {
                                if !names.contains(&row.name) {
                                    names.push(row.name.clone());
                                }
                            }
                        }
                        return Ok(names);
                    }
                    Err(e) => {
                        log::debug!("Grid picker failed: {e:#}");
                        utils::print_warning(WARNING_GRID_FAILED);
                    }
                }
            }
        }

        Ok(self.presenter.present(spec, request.ui)?.selected())
    }

    fn confirm_retry(&self, ui: UiPreference) -> bool {
        match self.resolve_menu(&MenuSpec::yes_no(PROMPT_TRY_AGAIN), ui) {
            Ok(MenuResult::YesNo(again)) => again,
            Ok(_) => false,
            Err(e) => {
                utils::print_warning(&format!("Cannot ask to retry: {e}"));
                false
            }
        }
    }
}
