//! Utility functions for terminal output formatting
//!
//! This module provides consistent, colored status lines for the user. They
//! go to stderr so that stdout stays reserved for results scripts consume.

use colored::*;
use console::Term;
use dialoguer::theme::ColorfulTheme;
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::time::Duration;

use crate::constants::{ENV_CI, TRUTHY_TOKENS};

/// Displays a success message with a green checkmark
pub fn print_success(message: &str) {
    eprintln!("\r{} {}", "✓".green(), message);
}

/// Displays an error message with a red X mark
///
/// # Example
///
/// ```no_run
/// use dirpick::utils::print_error;
///
/// print_error("Failed to create directory: permission denied");
/// ```
pub fn print_error(message: &str) {
    eprintln!("\r{} {}", "✗".red(), message);
}

/// Displays a warning message with a yellow marker
pub fn print_warning(message: &str) {
    log::debug!("warning reported: {message}");
    eprintln!("\r{} {}", "⚠".yellow(), message.yellow());
}

/// Displays an informational message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "•".bright_blue(), message);
}

/// Returns true if a value is one of the accepted truthy tokens
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    TRUTHY_TOKENS.iter().any(|t| t.eq_ignore_ascii_case(value))
}

/// Returns true when running under a CI system
pub fn is_ci() -> bool {
    env::var(ENV_CI)
        .map(|v| !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"))
        .unwrap_or(false)
}

/// Returns true when a person can interact with the terminal on stderr
pub fn is_interactive_terminal() -> bool {
    Term::stderr().is_term() && console::user_attended_stderr() && !is_ci()
}

/// Clears the screen when attached to an interactive terminal
///
/// Best effort: failures are ignored and nothing happens in CI or when the
/// output is redirected.
pub fn clear_screen() {
    if !is_interactive_terminal() {
        return;
    }
    let term = Term::stderr();
    if term.clear_screen().is_ok() {
        let _ = term.move_cursor_to(0, 0);
    }
}

/// Returns a consistent theme for all dialoguer prompts
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Starts a spinner on stderr; hidden when stderr is not a terminal
pub fn spinner(message: &str) -> ProgressBar {
    if !is_interactive_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⣾⣽⣻⢿⡿⣟⣯⣷ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
