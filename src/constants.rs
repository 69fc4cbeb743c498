//! Constants used throughout the application
//!
//! This module centralizes user-facing strings, environment variable names,
//! validation tables and numeric limits so that every layer agrees on them.
//!
//! # Organization
//!
//! - **Environment**: variable names and truthy tokens
//! - **Limits**: menu text bounds and retry counts
//! - **Validation**: reserved names and invalid character sets
//! - **Prompts and messages**: text shown to the user
//! - **Plain menu**: tokens and labels of the text menu

// Environment variables
pub const ENV_AUTOMATION: &str = "DIRPICK_AUTOMATION";
pub const ENV_MENU_SELECTION: &str = "DIRPICK_MENU_SELECTION";
pub const ENV_MENU_YESNO: &str = "DIRPICK_MENU_YESNO";
pub const ENV_SKIP_GRID: &str = "DIRPICK_SKIP_GRID";
pub const ENV_UI: &str = "DIRPICK_UI";
pub const ENV_CI: &str = "CI";
pub const ENV_RUST_LOG: &str = "RUST_LOG";

/// Tokens accepted as "true" for boolean-like environment values
pub const TRUTHY_TOKENS: &[&str] = &["1", "true", "y", "yes"];

// Configuration
pub const CONFIG_FILE_NAME: &str = ".dirpick.toml";

// Menu limits
pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_CANCEL_LABEL_LENGTH: usize = 100;
pub const DEFAULT_CANCEL_LABEL: &str = "Cancel";

// Retry limits
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const NAME_PROMPT_MAX_ATTEMPTS: u32 = 5;

// Validation
pub const RESERVED_REFERENCES: &[&str] = &[".", ".."];
pub const PATH_SEPARATORS: &[char] = &['/', '\\'];
pub const WINDOWS_INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
pub const UNIX_INVALID_CHARS: &[char] = &['/', '\0'];
pub const WINDOWS_RESERVED_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

// Prompt messages
pub const PROMPT_SELECT_DIRECTORY: &str = "Select a directory";
pub const PROMPT_SELECT_DIRECTORIES: &str = "Select directories";
pub const PROMPT_TRY_AGAIN: &str = "No directory selected. Try again?";
pub const PROMPT_DIRECTORY_NAME: &str = "Enter new directory name";
pub const PROMPT_USE_NAME: &str = "Use '{}' as the directory name?";

// Warning messages
pub const WARNING_BASE_NOT_FOUND: &str = "Base path does not exist or is not a directory: {}";
pub const WARNING_NO_DIRECTORIES: &str = "No directories available for selection in {}";
pub const WARNING_RICH_UNAVAILABLE: &str =
    "Rich console is not available in this terminal, using the plain menu";
pub const WARNING_RICH_FAILED: &str = "Rich console failed, falling back to the plain menu";
pub const WARNING_GRID_FAILED: &str = "Grid picker failed, falling back to the menu";
pub const WARNING_ATTEMPTS_EXHAUSTED: &str = "Giving up after {} attempts";
pub const WARNING_AUTOMATION_NO_NAME: &str =
    "Automation mode is enabled but no directory name was given";

// Error messages
pub const ERROR_PARENT_NOT_FOUND: &str = "Parent path does not exist or is not a directory: {}";
pub const ERROR_INVALID_NAME: &str = "Invalid directory name: {}";
pub const ERROR_CREATE_FAILED: &str = "Failed to create directory: {}";
pub const ERROR_ALREADY_EXISTS: &str = "Directory already exists: {}";

// Success / info messages
pub const SUCCESS_CREATED: &str = "Created directory {}";
pub const INFO_DRY_RUN: &str = "Dry run: would create {}";
pub const INFO_CREATING: &str = "Creating directory...";

// Plain menu
pub const CANCEL_TOKEN: &str = "Q";
pub const DEFAULT_MARKER: &str = "(default)";
pub const MSG_PRESS_ENTER: &str = "Press Enter to continue...";
pub const MSG_INVALID_SELECTION: &str = "Invalid selection, valid range 1-{}";
pub const MSG_INVALID_YESNO: &str = "Invalid input, please answer Y or N";
pub const PLAIN_SINGLE_PROMPT: &str = "Enter a number (1-{}) or Q to cancel: ";
pub const PLAIN_MULTIPLE_PROMPT: &str =
    "Enter numbers or ranges (e.g. 1,3,5-7) between 1-{} or Q to cancel: ";
pub const PLAIN_YESNO_SUFFIX: &str = " [Y/N]: ";

// Rich markup
pub const MARKUP_DIM_OPEN: &str = "[dim]";
pub const MARKUP_CLOSE: &str = "[/]";

// Grid layout
pub const GRID_COLUMN_SEPARATOR: &str = " │ ";
pub const GRID_MAX_NAME_WIDTH: usize = 40;

// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_NO_RESULT: u8 = 1;
