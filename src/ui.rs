//! User Interface abstraction layer
//!
//! This module provides the two interactive collaborators the menu subsystem
//! talks to: the rich console (styled prompts) and the grid picker (a
//! tabular chooser used for directory picking). Both sit behind traits so
//! business logic can be driven by mocks in tests.
//!
//! # Markup
//!
//! Text handed to a [`RichConsole`] is markup: `[[` and `]]` render literal
//! brackets and `[dim]...[/]` renders dimmed text. Use [`escape_markup`] for
//! any text that must appear verbatim.

use anyhow::{anyhow, Result};
use console::{style, Term};
use dialoguer::{Confirm, FuzzySelect, Input, MultiSelect, Select};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use unicode_width::UnicodeWidthStr;

use crate::constants::{GRID_COLUMN_SEPARATOR, GRID_MAX_NAME_WIDTH, MARKUP_CLOSE, MARKUP_DIM_OPEN};
use crate::utils::{self, get_theme};

/// Trait for the rich console collaborator
///
/// Every method may fail; callers are expected to catch the error and fall
/// back to a simpler presentation.
pub trait RichConsole {
    /// Capability probe: can styled prompts be shown right now?
    fn is_available(&self) -> Result<bool>;

    /// Single selection; `None` when the user dismissed the prompt
    fn prompt_single(&self, title: &str, items: &[String], default: Option<usize>)
        -> Result<Option<usize>>;

    /// Multiple selection; `None` when the user dismissed the prompt
    fn prompt_multiple(&self, title: &str, items: &[String]) -> Result<Option<Vec<usize>>>;

    /// Yes/no confirmation
    fn prompt_confirm(&self, title: &str, default: bool) -> Result<bool>;

    /// Free text entry; `None` when the user dismissed the prompt
    fn prompt_text(&self, title: &str) -> Result<Option<String>>;
}

/// Escapes text so that brackets render literally
pub fn escape_markup(text: &str) -> String {
    text.replace('[', "[[").replace(']', "]]")
}

/// Renders markup into terminal text
pub fn render_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("[[") {
            out.push('[');
            rest = after;
        } else if let Some(after) = rest.strip_prefix("]]") {
            out.push(']');
            rest = after;
        } else if let Some(after) = rest.strip_prefix(MARKUP_DIM_OPEN) {
            let (inner, tail) = match after.find(MARKUP_CLOSE) {
                Some(end) => (&after[..end], &after[end + MARKUP_CLOSE.len()..]),
                None => (after, ""),
            };
            out.push_str(&style(render_markup(inner)).dim().to_string());
            rest = tail;
        } else {
            let mut chars = rest.chars();
            if let Some(ch) = chars.next() {
                out.push(ch);
            }
            rest = chars.as_str();
        }
    }

    out
}

/// Production implementation using dialoguer
pub struct DialoguerConsole;

impl RichConsole for DialoguerConsole {
    fn is_available(&self) -> Result<bool> {
        Ok(utils::is_interactive_terminal())
    }

    fn prompt_single(
        &self,
        title: &str,
        items: &[String],
        default: Option<usize>,
    ) -> Result<Option<usize>> {
        let theme = get_theme();
        let items: Vec<String> = items.iter().map(|i| render_markup(i)).collect();
        let mut select = Select::with_theme(&theme)
            .with_prompt(render_markup(title))
            .items(&items);
        if let Some(default) = default {
            select = select.default(default);
        }
        Ok(select.interact_on_opt(&Term::stderr())?)
    }

    fn prompt_multiple(&self, title: &str, items: &[String]) -> Result<Option<Vec<usize>>> {
        let theme = get_theme();
        let items: Vec<String> = items.iter().map(|i| render_markup(i)).collect();
        let selections = MultiSelect::with_theme(&theme)
            .with_prompt(render_markup(title))
            .items(&items)
            .interact_on_opt(&Term::stderr())?;
        Ok(selections)
    }

    fn prompt_confirm(&self, title: &str, default: bool) -> Result<bool> {
        let theme = get_theme();
        let confirmed = Confirm::with_theme(&theme)
            .with_prompt(render_markup(title))
            .default(default)
            .interact_on_opt(&Term::stderr())?;
        Ok(confirmed.unwrap_or(default))
    }

    fn prompt_text(&self, title: &str) -> Result<Option<String>> {
        let theme = get_theme();
        let input = Input::<String>::with_theme(&theme)
            .with_prompt(render_markup(title))
            .allow_empty(true)
            .interact_text_on(&Term::stderr())?;
        if input.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(input))
    }
}

/// Mock implementation for testing
///
/// Uses interior mutability to allow mutable access through immutable references,
/// enabling testable UI interactions in the RichConsole trait. A prompt with no
/// configured response fails, which is how tests simulate a broken console.
pub struct MockConsole {
    available: Cell<bool>,
    probe_fails: Cell<bool>,
    probes: Cell<usize>,
    singles: RefCell<VecDeque<Option<usize>>>,
    multiples: RefCell<VecDeque<Option<Vec<usize>>>>,
    confirms: RefCell<VecDeque<bool>>,
    texts: RefCell<VecDeque<Option<String>>>,
    shown_items: RefCell<Vec<Vec<String>>>,
}

impl Default for MockConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConsole {
    /// Create an available MockConsole with no responses
    pub fn new() -> Self {
        Self {
            available: Cell::new(true),
            probe_fails: Cell::new(false),
            probes: Cell::new(0),
            singles: RefCell::new(VecDeque::new()),
            multiples: RefCell::new(VecDeque::new()),
            confirms: RefCell::new(VecDeque::new()),
            texts: RefCell::new(VecDeque::new()),
            shown_items: RefCell::new(Vec::new()),
        }
    }

    /// Set the capability probe answer
    pub fn available(self, available: bool) -> Self {
        self.available.set(available);
        self
    }

    /// Make the capability probe itself fail
    pub fn with_failing_probe(self) -> Self {
        self.probe_fails.set(true);
        self
    }

    /// Add a single-selection response
    pub fn with_single(self, selection: Option<usize>) -> Self {
        self.singles.borrow_mut().push_back(selection);
        self
    }

    /// Add a multi-selection response
    pub fn with_multiple(self, selection: Option<Vec<usize>>) -> Self {
        self.multiples.borrow_mut().push_back(selection);
        self
    }

    /// Add a confirmation response
    pub fn with_confirm(self, confirm: bool) -> Self {
        self.confirms.borrow_mut().push_back(confirm);
        self
    }

    /// Add a text response
    pub fn with_text(self, text: Option<&str>) -> Self {
        self.texts.borrow_mut().push_back(text.map(str::to_string));
        self
    }

    /// Change availability after construction
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Number of capability probes performed
    pub fn probe_count(&self) -> usize {
        self.probes.get()
    }

    /// Item lists shown by selection prompts, in call order
    pub fn shown_items(&self) -> Vec<Vec<String>> {
        self.shown_items.borrow().clone()
    }

    /// Check if all configured responses have been consumed
    pub fn is_exhausted(&self) -> bool {
        self.singles.borrow().is_empty()
            && self.multiples.borrow().is_empty()
            && self.confirms.borrow().is_empty()
            && self.texts.borrow().is_empty()
    }
}

impl RichConsole for MockConsole {
    fn is_available(&self) -> Result<bool> {
        self.probes.set(self.probes.get() + 1);
        if self.probe_fails.get() {
            return Err(anyhow!("Mock console probe failed"));
        }
        Ok(self.available.get())
    }

    fn prompt_single(
        &self,
        _title: &str,
        items: &[String],
        _default: Option<usize>,
    ) -> Result<Option<usize>> {
        self.shown_items.borrow_mut().push(items.to_vec());
        self.singles
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("No more single selections configured for MockConsole"))
    }

    fn prompt_multiple(&self, _title: &str, items: &[String]) -> Result<Option<Vec<usize>>> {
        self.shown_items.borrow_mut().push(items.to_vec());
        self.multiples
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("No more multi selections configured for MockConsole"))
    }

    fn prompt_confirm(&self, _title: &str, _default: bool) -> Result<bool> {
        self.confirms
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("No more confirmations configured for MockConsole"))
    }

    fn prompt_text(&self, _title: &str) -> Result<Option<String>> {
        self.texts
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("No more texts configured for MockConsole"))
    }
}

/// One row of the grid picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    pub name: String,
    pub path: String,
}

/// Trait for the tabular picker used ahead of menus when picking directories
pub trait GridPicker {
    /// Whether the picker can be shown right now
    fn is_available(&self) -> bool;

    /// Returns chosen row indices, or `None` when the user dismissed the picker
    fn pick(&self, title: &str, rows: &[GridRow], multiple: bool) -> Result<Option<Vec<usize>>>;
}

/// Lays rows out as two aligned columns
pub fn format_grid_rows(rows: &[GridRow]) -> Vec<String> {
    let width = rows
        .iter()
        .map(|r| r.name.width())
        .max()
        .unwrap_or(0)
        .min(GRID_MAX_NAME_WIDTH);

    rows.iter()
        .map(|r| {
            let padding = width.saturating_sub(r.name.width());
            format!(
                "{}{}{GRID_COLUMN_SEPARATOR}{}",
                r.name,
                " ".repeat(padding),
                r.path
            )
        })
        .collect()
}

/// Grid picker rendered in the terminal with dialoguer
///
/// Single picks use the fuzzy finder so long listings can be narrowed by
/// typing; multiple picks use a checkbox list.
pub struct TerminalGrid;

impl GridPicker for TerminalGrid {
    fn is_available(&self) -> bool {
        utils::is_interactive_terminal()
    }

    fn pick(&self, title: &str, rows: &[GridRow], multiple: bool) -> Result<Option<Vec<usize>>> {
        let theme = get_theme();
        let lines = format_grid_rows(rows);
        let term = Term::stderr();

        if multiple {
            Ok(MultiSelect::with_theme(&theme)
                .with_prompt(title)
                .items(&lines)
                .interact_on_opt(&term)?)
        } else {
            Ok(FuzzySelect::with_theme(&theme)
                .with_prompt(title)
                .items(&lines)
                .default(0)
                .interact_on_opt(&term)?
                .map(|i| vec![i]))
        }
    }
}

/// Mock grid picker for testing
pub struct MockGrid {
    available: bool,
    responses: RefCell<VecDeque<Option<Vec<usize>>>>,
}

impl MockGrid {
    pub fn new(available: bool) -> Self {
        Self {
            available,
            responses: RefCell::new(VecDeque::new()),
        }
    }

    /// Add a pick response
    pub fn with_pick(self, selection: Option<Vec<usize>>) -> Self {
        self.responses.borrow_mut().push_back(selection);
        self
    }
}

impl GridPicker for MockGrid {
    fn is_available(&self) -> bool {
        self.available
    }

    fn pick(&self, _title: &str, _rows: &[GridRow], _multiple: bool) -> Result<Option<Vec<usize>>> {
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("No more picks configured for MockGrid"))
    }
}
