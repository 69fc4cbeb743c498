//! Directory candidate filtering
//!
//! Removes candidates whose names match an exclusion wildcard and, when asked,
//! candidates with no entries. Order of the surviving candidates is kept.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::cell::OnceCell;
use std::path::PathBuf;

use crate::error::{Result, SelectionError};
use crate::infrastructure::{DirEntryInfo, FileSystem};
use crate::utils;

/// A directory offered for selection
///
/// Whether the directory has entries is probed at most once, on first use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryCandidate {
    pub name: String,
    pub path: PathBuf,
    has_entries: OnceCell<bool>,
}

impl DirectoryCandidate {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            has_entries: OnceCell::new(),
        }
    }

    /// Probes the directory for a first entry, caching a successful answer
    pub fn has_entries(&self, fs: &dyn FileSystem) -> anyhow::Result<bool> {
        if let Some(&known) = self.has_entries.get() {
            return Ok(known);
        }
        let probed = fs.has_entries(&self.path)?;
        let _ = self.has_entries.set(probed);
        Ok(probed)
    }
}

impl From<DirEntryInfo> for DirectoryCandidate {
    fn from(entry: DirEntryInfo) -> Self {
        Self::new(entry.name, entry.path)
    }
}

/// Compiled set of wildcard exclusion patterns
///
/// Patterns use glob syntax (`*`, `?`, `[...]`, `[!...]`) and must match
/// the whole name.
#[derive(Debug, Clone)]
pub struct ExclusionPatterns {
    set: GlobSet,
}

impl Default for ExclusionPatterns {
    fn default() -> Self {
        Self {
            set: GlobSet::empty(),
        }
    }
}

impl ExclusionPatterns {
    /// Compiles `patterns`, rejecting the first one that is not a valid glob
    pub fn new<S: AsRef<str>>(patterns: &[S], case_insensitive: bool) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob = GlobBuilder::new(pattern)
                .case_insensitive(case_insensitive)
                .literal_separator(true)
                .build()
                .map_err(|e| {
                    SelectionError::InvalidArgument(format!(
                        "invalid exclusion pattern '{pattern}': {e}"
                    ))
                })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| SelectionError::InvalidArgument(format!("exclusion patterns: {e}")))?;
        Ok(Self { set })
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// True if the name matches any pattern
    pub fn matches(&self, name: &str) -> bool {
        self.set.is_match(name)
    }
}

/// Filters candidates by exclusion patterns and, optionally, emptiness
///
/// # Arguments
///
/// * `candidates` - Directories in display order
/// * `excludes` - Compiled exclusion patterns; a match on any removes the candidate
/// * `exclude_empty` - Remove candidates whose probe finds no entry
/// * `fs` - Filesystem used for the emptiness probe
///
/// A probe failure removes that candidate with a warning; the remaining
/// candidates are still returned.
pub fn filter_directories(
    candidates: Vec<DirectoryCandidate>,
    excludes: &ExclusionPatterns,
    exclude_empty: bool,
    fs: &dyn FileSystem,
) -> Vec<DirectoryCandidate> {
    if excludes.is_empty() && !exclude_empty {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|candidate| {
            if excludes.matches(&candidate.name) {
                log::debug!("Excluded '{}' by pattern", candidate.name);
                return false;
            }
            if !exclude_empty {
                return true;
            }
            match candidate.has_entries(fs) {
                Ok(has_entries) => has_entries,
                Err(e) => {
                    utils::print_warning(&format!(
                        "Skipping '{}': cannot read contents ({e})",
                        candidate.path.display()
                    ));
                    false
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::filesystem::mock::MockFileSystem;

    fn candidates(names: &[&str]) -> Vec<DirectoryCandidate> {
        names
            .iter()
            .map(|n| DirectoryCandidate::new(*n, format!("/base/{n}")))
            .collect()
    }

    fn names(list: &[DirectoryCandidate]) -> Vec<&str> {
        list.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_negated_class_excludes_everything_else() -> Result<()> {
        let excludes = ExclusionPatterns::new(&["[!.]*"], false)?;
        assert!(excludes.matches("src"));
        assert!(excludes.matches("!x"));
        assert!(!excludes.matches(".git"));
        Ok(())
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        for bad in ["[z-a]*", "[x"] {
            let err = ExclusionPatterns::new(&["ok", bad], false).unwrap_err();
            assert!(err.is_caller_fault());
            assert!(err.to_string().contains(bad));
        }
    }

    #[test]
    fn test_whole_name_must_match() -> Result<()> {
        let excludes = ExclusionPatterns::new(&["a?c"], false)?;
        assert!(excludes.matches("abc"));
        assert!(!excludes.matches("abcd"));
        assert!(!excludes.matches("xabc"));
        Ok(())
    }

    #[test]
    fn test_exclude_by_exact_name() -> Result<()> {
        let fs = MockFileSystem::new();
        let excludes = ExclusionPatterns::new(&["Folder2"], false)?;
        let result = filter_directories(candidates(&["Folder1", "Folder2"]), &excludes, false, &fs);
        assert_eq!(names(&result), vec!["Folder1"]);
        Ok(())
    }

    #[test]
    fn test_exclude_by_wildcards_keeps_order() -> Result<()> {
        let fs = MockFileSystem::new();
        let excludes = ExclusionPatterns::new(&[".*", "tmp?", "build[0-9]"], false)?;
        let result = filter_directories(
            candidates(&["src", ".git", "tmp1", "tmp", "build7", "docs"]),
            &excludes,
            false,
            &fs,
        );
        assert_eq!(names(&result), vec!["src", "tmp", "docs"]);
        Ok(())
    }

    #[test]
    fn test_case_sensitivity_follows_flag() -> Result<()> {
        let fs = MockFileSystem::new();
        let sensitive = ExclusionPatterns::new(&["folder*"], false)?;
        let insensitive = ExclusionPatterns::new(&["folder*"], true)?;
        assert_eq!(
            filter_directories(candidates(&["Folder1"]), &sensitive, false, &fs).len(),
            1
        );
        assert!(filter_directories(candidates(&["Folder1"]), &insensitive, false, &fs).is_empty());
        Ok(())
    }

    #[test]
    fn test_exclude_empty() {
        let fs = MockFileSystem::new()
            .with_directory("/base/Folder1")
            .with_file("/base/Folder1/file.txt")
            .with_directory("/base/Folder2");
        let result = filter_directories(
            candidates(&["Folder1", "Folder2"]),
            &ExclusionPatterns::default(),
            true,
            &fs,
        );
        assert_eq!(names(&result), vec!["Folder1"]);
    }

    #[test]
    fn test_probe_failure_excludes_only_that_candidate() {
        let fs = MockFileSystem::new()
            .with_directory("/base/ok")
            .with_directory("/base/ok/nested")
            .with_directory("/base/denied")
            .with_failure("/base/denied", "permission denied");
        let result = filter_directories(
            candidates(&["denied", "ok"]),
            &ExclusionPatterns::default(),
            true,
            &fs,
        );
        assert_eq!(names(&result), vec!["ok"]);
    }

    #[test]
    fn test_has_entries_is_cached() -> anyhow::Result<()> {
        let fs = MockFileSystem::new()
            .with_directory("/base/a")
            .with_file("/base/a/f");
        let candidate = DirectoryCandidate::new("a", "/base/a");
        assert!(candidate.has_entries(&fs)?);

        let gone = MockFileSystem::new();
        assert!(candidate.has_entries(&gone)?);
        Ok(())
    }
}
