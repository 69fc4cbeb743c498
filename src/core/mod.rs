//! Core business logic module
//!
//! This module contains the pure selection logic for dirpick,
//! independent of UI and infrastructure concerns.

pub mod filter;
pub mod validation;

// Re-export commonly used items
pub use filter::{filter_directories, DirectoryCandidate, ExclusionPatterns};
pub use validation::{validate_directory_name, NameRejection, Platform};
