//! Infrastructure layer module
//!
//! This module contains the filesystem collaborator the selection logic
//! depends on.

pub mod filesystem;

// Re-export commonly used items
pub use filesystem::{DirEntryInfo, DirectoryListing, FileSystem, RealFileSystem};
