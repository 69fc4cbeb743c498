//! Shared fixtures for integration tests

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use dirpick::menu::{PlainMenu, ScriptedInput, SharedBuffer};

/// Directory names created by [`sample_tree`]
pub const SAMPLE_DIRS: &[&str] = &["alpha", "beta", "gamma [old]", "node_modules"];

/// Creates a base directory with a few subdirectories
///
/// `alpha` and `node_modules` contain a file; `beta` and `gamma [old]` are
/// empty. A plain file sits next to them.
pub fn sample_tree() -> Result<TempDir> {
    let dir = TempDir::new()?;
    for name in SAMPLE_DIRS {
        fs::create_dir(dir.path().join(name))?;
    }
    fs::write(dir.path().join("alpha").join("notes.txt"), "notes")?;
    fs::write(dir.path().join("node_modules").join("index.js"), "")?;
    fs::write(dir.path().join("README.md"), "readme")?;
    Ok(dir)
}

/// Plain menu answering from `lines`, with its output captured
pub fn scripted_menu<'a>(lines: &[&str]) -> (PlainMenu<'a>, SharedBuffer) {
    let out = SharedBuffer::new();
    let menu = PlainMenu::new(Box::new(ScriptedInput::new(lines)), Box::new(out.clone()));
    (menu, out)
}

pub fn file_names(paths: impl IntoIterator<Item = impl AsRef<Path>>) -> Vec<String> {
    paths
        .into_iter()
        .filter_map(|p| {
            p.as_ref()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .collect()
}
