//! Plain text menus
//!
//! The baseline presentation: numbered options written to a stream and
//! answers read one line at a time. Each prompt runs a small state machine
//! (prompting, validating, rejected, finished) that only ends on a valid
//! answer or an explicit cancel. Input comes from a [`LineSource`] so tests
//! can script the answers.
//!
//! # Multi-selection syntax
//!
//! Comma-separated 1-based numbers or inclusive ranges (`1-3,5`). A range
//! written backwards (`5-3`) is swapped to ascending. A line with any
//! out-of-range number is rejected as a whole, and accepted selections are
//! returned in ascending option order.

use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use super::{MenuMode, MenuResult, MenuSpec, MenuStrategy};
use crate::constants::{
    CANCEL_TOKEN, DEFAULT_MARKER, MSG_INVALID_SELECTION, MSG_INVALID_YESNO, MSG_PRESS_ENTER,
    PLAIN_MULTIPLE_PROMPT, PLAIN_SINGLE_PROMPT, PLAIN_YESNO_SUFFIX,
};
use crate::error::{Result, SelectionError};
use crate::utils;

/// Source of console input lines
pub trait LineSource {
    /// Next line without its line terminator; `None` once input is closed
    fn read_line(&self) -> io::Result<Option<String>>;
}

/// Reads lines from standard input
pub struct StdinLines;

impl LineSource for StdinLines {
    fn read_line(&self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if io::stdin().lock().read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Scripted input for tests
pub struct ScriptedInput {
    lines: RefCell<VecDeque<String>>,
}

impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: RefCell::new(lines.iter().map(|l| l.to_string()).collect()),
        }
    }

    /// Lines not consumed yet
    pub fn remaining(&self) -> usize {
        self.lines.borrow().len()
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&self) -> io::Result<Option<String>> {
        Ok(self.lines.borrow_mut().pop_front())
    }
}

impl<T: LineSource + ?Sized> LineSource for Rc<T> {
    fn read_line(&self) -> io::Result<Option<String>> {
        (**self).read_line()
    }
}

/// In-memory output that stays readable after being handed to a menu
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Parsed answer to a single-selection prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleInput {
    Cancel,
    Index(usize),
    Invalid,
}

/// Parsed answer to a multi-selection prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultipleInput {
    Cancel,
    /// Zero-based indices, ascending and unique
    Indices(Vec<usize>),
    Invalid,
}

/// Parses a single-selection answer against `count` options
pub fn parse_single_input(line: &str, count: usize) -> SingleInput {
    let line = line.trim();
    if line.eq_ignore_ascii_case(CANCEL_TOKEN) {
        return SingleInput::Cancel;
    }
    match line.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => SingleInput::Index(n - 1),
        _ => SingleInput::Invalid,
    }
}

/// Parses a multi-selection answer against `count` options
pub fn parse_multiple_input(line: &str, count: usize) -> MultipleInput {
    let line = line.trim();
    if line.eq_ignore_ascii_case(CANCEL_TOKEN) {
        return MultipleInput::Cancel;
    }

    let mut valid = BTreeSet::new();
    let mut out_of_range = false;

    for token in line.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let bounds = match token.split_once('-') {
            Some((start, end)) => start
                .trim()
                .parse::<usize>()
                .ok()
                .zip(end.trim().parse::<usize>().ok()),
            None => token.parse::<usize>().ok().map(|n| (n, n)),
        };
        let Some((start, end)) = bounds else {
            return MultipleInput::Invalid;
        };
        let (low, high) = if start > end { (end, start) } else { (start, end) };

        if low < 1 || high > count {
            out_of_range = true;
        }
        let (from, to) = (low.max(1), high.min(count));
        if from <= to {
            valid.extend((from..=to).map(|n| n - 1));
        }
    }

    if valid.is_empty() || out_of_range {
        return MultipleInput::Invalid;
    }
    MultipleInput::Indices(valid.into_iter().collect())
}

enum MenuState {
    Prompting,
    Validating(String),
    Rejected,
    Finished(MenuResult),
}

/// How one prompt loop behaves
struct PromptPlan<'p> {
    prompt: String,
    invalid_message: String,
    show_options: bool,
    pause_after_invalid: bool,
    spec: &'p MenuSpec,
}

/// Plain text menu strategy
pub struct PlainMenu<'a> {
    input: Box<dyn LineSource + 'a>,
    output: RefCell<Box<dyn Write + 'a>>,
    clear_screen: bool,
}

impl<'a> PlainMenu<'a> {
    /// Menu over arbitrary input and output; never clears the screen
    pub fn new(input: Box<dyn LineSource + 'a>, output: Box<dyn Write + 'a>) -> Self {
        Self {
            input,
            output: RefCell::new(output),
            clear_screen: false,
        }
    }

    /// Menu over stdin and stderr, clearing the screen only on a real terminal
    pub fn stdio() -> Self {
        Self {
            input: Box::new(StdinLines),
            output: RefCell::new(Box::new(io::stderr())),
            clear_screen: utils::is_interactive_terminal(),
        }
    }

    /// Reads one line of free text; blank input counts as no answer
    pub fn read_text(&self, title: &str) -> Result<Option<String>> {
        self.write(&format!("{title}: "))?;
        let line = self.next_line()?;
        if line.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn single(&self, spec: &MenuSpec) -> Result<MenuResult> {
        let count = spec.options.len();
        let plan = PromptPlan {
            prompt: PLAIN_SINGLE_PROMPT.replace("{}", &count.to_string()),
            invalid_message: MSG_INVALID_SELECTION.replace("{}", &count.to_string()),
            show_options: true,
            pause_after_invalid: true,
            spec,
        };
        self.run(&plan, |line| match parse_single_input(line, count) {
            SingleInput::Cancel => Some(MenuResult::Single(None)),
            SingleInput::Index(i) => Some(MenuResult::Single(Some(spec.options[i].clone()))),
            SingleInput::Invalid => None,
        })
    }

    fn multiple(&self, spec: &MenuSpec) -> Result<MenuResult> {
        let count = spec.options.len();
        let plan = PromptPlan {
            prompt: PLAIN_MULTIPLE_PROMPT.replace("{}", &count.to_string()),
            invalid_message: MSG_INVALID_SELECTION.replace("{}", &count.to_string()),
            show_options: true,
            pause_after_invalid: true,
            spec,
        };
        self.run(&plan, |line| match parse_multiple_input(line, count) {
            MultipleInput::Cancel => Some(MenuResult::Multiple(Vec::new())),
            MultipleInput::Indices(indices) => Some(MenuResult::Multiple(
                indices.into_iter().map(|i| spec.options[i].clone()).collect(),
            )),
            MultipleInput::Invalid => None,
        })
    }

    fn yes_no(&self, spec: &MenuSpec) -> Result<MenuResult> {
        let plan = PromptPlan {
            prompt: format!("{}{PLAIN_YESNO_SUFFIX}", spec.title),
            invalid_message: MSG_INVALID_YESNO.to_string(),
            show_options: false,
            pause_after_invalid: false,
            spec,
        };
        self.run(&plan, |line| match line.trim() {
            "Y" | "y" => Some(MenuResult::YesNo(true)),
            "N" | "n" => Some(MenuResult::YesNo(false)),
            _ => None,
        })
    }

    fn run<F>(&self, plan: &PromptPlan<'_>, validate: F) -> Result<MenuResult>
    where
        F: Fn(&str) -> Option<MenuResult>,
    {
        let mut state = MenuState::Prompting;
        loop {
            state = match state {
                MenuState::Prompting => {
                    if plan.show_options {
                        self.render_options(plan.spec)?;
                    }
                    self.write(&plan.prompt)?;
                    MenuState::Validating(self.next_line()?)
                }
                MenuState::Validating(line) => match validate(&line) {
                    Some(result) => MenuState::Finished(result),
                    None => MenuState::Rejected,
                },
                MenuState::Rejected => {
                    self.write(&format!("{}\n", plan.invalid_message))?;
                    if plan.pause_after_invalid {
                        self.write(&format!("{MSG_PRESS_ENTER}\n"))?;
                        self.next_line()?;
                    }
                    MenuState::Prompting
                }
                MenuState::Finished(result) => return Ok(result),
            };
        }
    }

    fn render_options(&self, spec: &MenuSpec) -> Result<()> {
        if self.clear_screen {
            utils::clear_screen();
        }
        let mut text = format!("\n{}\n\n", spec.title);
        for (i, option) in spec.options.iter().enumerate() {
            if spec.default_selection == Some(i) {
                text.push_str(&format!("  {}. {option} {DEFAULT_MARKER}\n", i + 1));
            } else {
                text.push_str(&format!("  {}. {option}\n", i + 1));
            }
        }
        text.push_str(&format!("  [{CANCEL_TOKEN}] {}\n\n", spec.cancel_label));
        self.write(&text)
    }

    fn write(&self, text: &str) -> Result<()> {
        let mut out = self.output.borrow_mut();
        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| SelectionError::PresentationFailure(e.to_string()))
    }

    fn next_line(&self) -> Result<String> {
        self.input
            .read_line()
            .map_err(|e| SelectionError::PresentationFailure(e.to_string()))?
            .ok_or_else(|| SelectionError::PresentationFailure("console input closed".into()))
    }
}

impl MenuStrategy for PlainMenu<'_> {
    fn present(&self, spec: &MenuSpec) -> Result<MenuResult> {
        match spec.mode {
            MenuMode::Single => self.single(spec),
            MenuMode::Multiple => self.multiple(spec),
            MenuMode::YesNo => self.yes_no(spec),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn menu_with<'a>(lines: &[&str]) -> (PlainMenu<'a>, SharedBuffer) {
        let out = SharedBuffer::new();
        let menu = PlainMenu::new(Box::new(ScriptedInput::new(lines)), Box::new(out.clone()));
        (menu, out)
    }

    fn five() -> Vec<String> {
        ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("q", SingleInput::Cancel)]
    #[case(" Q ", SingleInput::Cancel)]
    #[case("1", SingleInput::Index(0))]
    #[case("3", SingleInput::Index(2))]
    #[case("0", SingleInput::Invalid)]
    #[case("4", SingleInput::Invalid)]
    #[case("two", SingleInput::Invalid)]
    #[case("", SingleInput::Invalid)]
    fn test_parse_single(#[case] line: &str, #[case] expected: SingleInput) {
        assert_eq!(parse_single_input(line, 3), expected);
    }

    #[rstest]
    #[case("1-3,5", MultipleInput::Indices(vec![0, 1, 2, 4]))]
    #[case("5,1,1", MultipleInput::Indices(vec![0, 4]))]
    #[case("4-2", MultipleInput::Indices(vec![1, 2, 3]))]
    #[case(" 2 , 3 ", MultipleInput::Indices(vec![1, 2]))]
    #[case("1,6", MultipleInput::Invalid)]
    #[case("0", MultipleInput::Invalid)]
    #[case("4-9", MultipleInput::Invalid)]
    #[case("a-b", MultipleInput::Invalid)]
    #[case("", MultipleInput::Invalid)]
    #[case("q", MultipleInput::Cancel)]
    fn test_parse_multiple(#[case] line: &str, #[case] expected: MultipleInput) {
        assert_eq!(parse_multiple_input(line, 5), expected);
    }

    #[test]
    fn test_single_cancel() -> Result<()> {
        let (menu, _) = menu_with(&["Q"]);
        let spec = MenuSpec::single("Pick", five());
        assert_eq!(menu.present(&spec)?, MenuResult::Single(None));
        Ok(())
    }

    #[test]
    fn test_single_reprompts_after_out_of_range() -> Result<()> {
        let (menu, out) = menu_with(&["9", "", "2"]);
        let spec = MenuSpec::single("Pick", five());
        assert_eq!(menu.present(&spec)?, MenuResult::Single(Some("b".into())));
        let text = out.contents();
        assert!(text.contains("Invalid selection, valid range 1-5"));
        assert_eq!(text.matches("[Q] Cancel").count(), 2);
        Ok(())
    }

    #[test]
    fn test_single_renders_default_and_cancel_label() -> Result<()> {
        let (menu, out) = menu_with(&["1"]);
        let spec = MenuSpec::single("Pick", five())
            .with_default(1)
            .with_cancel_label("Back");
        menu.present(&spec)?;
        let text = out.contents();
        assert!(text.contains("  2. b (default)"));
        assert!(text.contains("[Q] Back"));
        Ok(())
    }

    #[test]
    fn test_multiple_ranges_sorted() -> Result<()> {
        let (menu, _) = menu_with(&["5,1-3"]);
        let spec = MenuSpec::multiple("Pick", five());
        assert_eq!(
            menu.present(&spec)?,
            MenuResult::Multiple(vec!["a".into(), "b".into(), "c".into(), "e".into()])
        );
        Ok(())
    }

    #[test]
    fn test_multiple_rejects_mixed_line_entirely() -> Result<()> {
        let (menu, _) = menu_with(&["1,9", "", "2"]);
        let spec = MenuSpec::multiple("Pick", five());
        assert_eq!(menu.present(&spec)?, MenuResult::Multiple(vec!["b".into()]));
        Ok(())
    }

    #[test]
    fn test_multiple_cancel_is_empty() -> Result<()> {
        let (menu, _) = menu_with(&["q"]);
        let spec = MenuSpec::multiple("Pick", five());
        assert_eq!(menu.present(&spec)?, MenuResult::Multiple(vec![]));
        Ok(())
    }

    #[test]
    fn test_yes_no_loops_until_answer() -> Result<()> {
        let (menu, out) = menu_with(&["maybe", "yes", "N"]);
        let spec = MenuSpec::yes_no("Continue?");
        assert_eq!(menu.present(&spec)?, MenuResult::YesNo(false));
        assert_eq!(out.contents().matches(MSG_INVALID_YESNO).count(), 2);
        Ok(())
    }

    #[test]
    fn test_closed_input_is_presentation_failure() {
        let (menu, _) = menu_with(&["7"]);
        let spec = MenuSpec::single("Pick", five());
        assert!(matches!(
            menu.present(&spec),
            Err(SelectionError::PresentationFailure(_))
        ));
    }

    #[test]
    fn test_read_text() -> Result<()> {
        let (menu, _) = menu_with(&["  new-dir ", "   "]);
        assert_eq!(menu.read_text("Name")?, Some("  new-dir ".to_string()));
        assert_eq!(menu.read_text("Name")?, None);
        assert!(menu.read_text("Name").is_err());
        Ok(())
    }

    #[test]
    fn test_pause_consumes_one_line() -> Result<()> {
        let input = Rc::new(ScriptedInput::new(&["x", "ignored", "1", "spare"]));
        let menu = PlainMenu::new(Box::new(input.clone()), Box::new(SharedBuffer::new()));
        let spec = MenuSpec::single("Pick", five());
        assert_eq!(menu.present(&spec)?, MenuResult::Single(Some("a".into())));
        assert_eq!(input.remaining(), 1);
        Ok(())
    }
}
