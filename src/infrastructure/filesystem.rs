//! Filesystem operations abstraction layer
//!
//! This module provides the directory listing, existence checks, emptiness
//! probe and directory creation the selection logic needs, behind a trait so
//! business logic can be tested against an in-memory mock.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::error::SelectionError;

/// A directory found under a base path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntryInfo {
    pub name: String,
    pub path: PathBuf,
}

/// Result of listing the subdirectories of a path
///
/// Entries that could not be inspected are left out of `entries` and
/// described in `skipped` instead of failing the whole listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    pub entries: Vec<DirEntryInfo>,
    pub skipped: Vec<String>,
}

/// Trait for filesystem operations
///
/// This trait abstracts filesystem operations, making the code testable
/// by allowing mock implementations for testing and real implementations for production.
pub trait FileSystem {
    /// List the immediate subdirectories of a path, sorted by name
    fn list_directories(&self, path: &Path) -> Result<DirectoryListing>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Create a single directory; fails if it already exists
    fn create_dir(&self, path: &Path) -> Result<()>;

    /// Check whether a directory has at least one entry
    fn has_entries(&self, path: &Path) -> Result<bool>;
}

/// Production implementation using std::fs
pub struct RealFileSystem;

impl RealFileSystem {
    /// Create a new RealFileSystem instance
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn list_directories(&self, path: &Path) -> Result<DirectoryListing> {
        let read_dir = std::fs::read_dir(path).map_err(|e| SelectionError::io(path, e))?;
        let mut listing = DirectoryListing::default();

        for entry in read_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    listing.skipped.push(format!("{}: {e}", path.display()));
                    continue;
                }
            };
            let entry_path = entry.path();
            // Follows symlinks so linked directories are offered too
            match std::fs::metadata(&entry_path) {
                Ok(meta) if meta.is_dir() => listing.entries.push(DirEntryInfo {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path: entry_path,
                }),
                Ok(_) => {}
                Err(e) => listing
                    .skipped
                    .push(format!("{}: {e}", entry_path.display())),
            }
        }

        listing.entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listing)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir(&self, path: &Path) -> Result<()> {
        std::fs::create_dir(path).map_err(|e| SelectionError::io(path, e))?;
        Ok(())
    }

    fn has_entries(&self, path: &Path) -> Result<bool> {
        let mut read_dir = std::fs::read_dir(path).map_err(|e| SelectionError::io(path, e))?;
        match read_dir.next() {
            None => Ok(false),
            Some(Ok(_)) => Ok(true),
            Some(Err(e)) => Err(SelectionError::io(path, e).into()),
        }
    }
}

pub mod mock {
    use super::*;
    use std::cell::RefCell;
    use std::collections::{BTreeSet, HashMap};

    /// Mock filesystem for testing
    pub struct MockFileSystem {
        files: RefCell<BTreeSet<PathBuf>>,
        directories: RefCell<BTreeSet<PathBuf>>,
        should_fail: RefCell<HashMap<PathBuf, &'static str>>,
        unreadable_entries: RefCell<BTreeSet<PathBuf>>,
    }

    impl Default for MockFileSystem {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockFileSystem {
        /// Create a new MockFileSystem instance
        pub fn new() -> Self {
            Self {
                files: RefCell::new(BTreeSet::new()),
                directories: RefCell::new(BTreeSet::new()),
                should_fail: RefCell::new(HashMap::new()),
                unreadable_entries: RefCell::new(BTreeSet::new()),
            }
        }

        /// Add a file to the mock filesystem
        pub fn with_file(self, path: &str) -> Self {
            self.files.borrow_mut().insert(PathBuf::from(path));
            self
        }

        /// Add a directory to the mock filesystem
        pub fn with_directory(self, path: &str) -> Self {
            self.directories.borrow_mut().insert(PathBuf::from(path));
            self
        }

        /// Make every operation on a specific path fail
        pub fn with_failure(self, path: &str, error: &'static str) -> Self {
            self.should_fail
                .borrow_mut()
                .insert(PathBuf::from(path), error);
            self
        }

        /// Make a directory show up as unreadable when its parent is listed
        pub fn with_unreadable_entry(self, path: &str) -> Self {
            self.directories.borrow_mut().insert(PathBuf::from(path));
            self.unreadable_entries
                .borrow_mut()
                .insert(PathBuf::from(path));
            self
        }

        fn check_failure(&self, path: &Path) -> Result<()> {
            if let Some(error) = self.should_fail.borrow().get(path) {
                return Err(anyhow::anyhow!("Mock filesystem error: {error}"));
            }
            Ok(())
        }

        fn children<'a>(set: &'a BTreeSet<PathBuf>, parent: &'a Path) -> impl Iterator<Item = &'a PathBuf> {
            set.iter().filter(move |p| p.parent() == Some(parent))
        }
    }

    impl FileSystem for MockFileSystem {
        fn list_directories(&self, path: &Path) -> Result<DirectoryListing> {
            self.check_failure(path)?;
            if !self.is_dir(path) {
                return Err(SelectionError::NotFound(path.to_path_buf()).into());
            }

            let directories = self.directories.borrow();
            let unreadable = self.unreadable_entries.borrow();
            let mut listing = DirectoryListing::default();
            for dir in Self::children(&directories, path) {
                if unreadable.contains(dir) {
                    listing
                        .skipped
                        .push(format!("{}: permission denied", dir.display()));
                    continue;
                }
                let name = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                listing.entries.push(DirEntryInfo {
                    name,
                    path: dir.clone(),
                });
            }
            listing.entries.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(listing)
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains(path) || self.directories.borrow().contains(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.directories.borrow().contains(path)
        }

        fn create_dir(&self, path: &Path) -> Result<()> {
            self.check_failure(path)?;
            if self.exists(path) {
                return Err(SelectionError::AlreadyExists(path.to_path_buf()).into());
            }
            match path.parent() {
                Some(parent) if self.is_dir(parent) => {}
                _ => return Err(SelectionError::NotFound(path.to_path_buf()).into()),
            }
            self.directories.borrow_mut().insert(path.to_path_buf());
            Ok(())
        }

        fn has_entries(&self, path: &Path) -> Result<bool> {
            self.check_failure(path)?;
            if !self.is_dir(path) {
                return Err(SelectionError::NotFound(path.to_path_buf()).into());
            }
            let has_dir = Self::children(&self.directories.borrow(), path).next().is_some();
            let has_file = Self::children(&self.files.borrow(), path).next().is_some();
            Ok(has_dir || has_file)
        }
    }
}
