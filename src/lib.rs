//! dirpick - Interactive directory picker and creator
//!
//! dirpick lets a script or a person choose existing directories under a base
//! path, or create a new validated one, through whichever presentation the
//! terminal supports.
//!
//! # Features
//!
//! - **Filtering**: Exclude directories by wildcard and skip empty ones
//! - **Layered presentation**: Grid picker, rich prompts, plain numbered menus
//! - **Automatic fallback**: A failing rich prompt is retried as a plain menu
//! - **Automation**: Every prompt can be answered from environment variables
//! - **Name validation**: Platform rules for separators, reserved names and devices
//!
//! # Architecture
//!
//! - [`core`] - Pure logic: name validation and directory filtering
//! - [`infrastructure`] - Filesystem collaborator
//! - [`ui`] - Rich console and grid picker collaborators
//! - [`menu`] - Menu descriptions, presenters and automated answers
//! - [`commands`] - Pick and create operations
//! - [`config`] - Configuration file and environment overrides
//! - [`error`] - Domain error type
//! - [`logging`] - Diagnostic logging setup
//! - [`utils`] - Terminal output helpers
//!
//! # Usage Example
//!
//! ```no_run
//! use dirpick::commands::{PickRequest, SelectionOrchestrator};
//! use dirpick::infrastructure::RealFileSystem;
//! use dirpick::menu::{CapabilityState, EnvAutomation, MenuPresenter, PlainMenu};
//! use dirpick::ui::DialoguerConsole;
//!
//! let fs = RealFileSystem::new();
//! let console = DialoguerConsole;
//! let capability = CapabilityState::new();
//! let automation = EnvAutomation;
//! let presenter = MenuPresenter::new(&console, &capability, PlainMenu::stdio());
//! let orchestrator = SelectionOrchestrator::new(&fs, presenter, &automation);
//!
//! for dir in orchestrator.pick_directories(&PickRequest::new("."))? {
//!     println!("{}", dir.path.display());
//! }
//! # Ok::<(), dirpick::error::SelectionError>(())
//! ```

pub mod commands;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod menu;
pub mod ui;
pub mod utils;
