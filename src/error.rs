//! Error types for directory selection and creation
//!
//! Expected outcomes of interactive use (cancellation, a rejected name, a
//! missing path) are reported to the user and returned as empty or absent
//! results; a rejected name travels as
//! [`CreationOutcome::Rejected`](crate::commands::CreationOutcome::Rejected).
//! Only [`SelectionError::InvalidMenu`] and [`SelectionError::InvalidArgument`]
//! escape to the caller as hard faults, since they indicate a caller bug
//! rather than an interactive mistake.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the selection subsystem
#[derive(Debug, Error)]
pub enum SelectionError {
    /// A path that must exist does not
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A directory that must not exist already does
    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Permission or other I/O failure from the filesystem
    #[error("{}: {detail}", path.display())]
    Io { path: PathBuf, detail: String },

    /// The rich console, grid picker or console input failed
    #[error("presentation failed: {0}")]
    PresentationFailure(String),

    /// A menu description violates its invariants
    #[error("invalid menu: {0}")]
    InvalidMenu(String),

    /// The caller supplied an out-of-range or conflicting argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl SelectionError {
    /// Wraps an I/O error, keeping `NotFound` and `AlreadyExists` distinguishable
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists(path),
            _ => Self::Io {
                path,
                detail: err.to_string(),
            },
        }
    }

    /// Returns true for errors that signal a caller bug
    pub fn is_caller_fault(&self) -> bool {
        matches!(self, Self::InvalidMenu(_) | Self::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, SelectionError>;
