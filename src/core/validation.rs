//! Directory name validation
//!
//! This module decides whether a user-supplied name can be used for a new
//! directory. It never touches the filesystem, so the rules for every
//! platform can be exercised from any host.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::constants::{
    PATH_SEPARATORS, RESERVED_REFERENCES, UNIX_INVALID_CHARS, WINDOWS_INVALID_CHARS,
    WINDOWS_RESERVED_DEVICE_NAMES,
};

/// Platform whose naming rules are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Unix,
}

impl Platform {
    /// The platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// Whether file names compare case-insensitively on this platform
    pub fn is_case_insensitive(self) -> bool {
        self == Platform::Windows
    }

    fn invalid_chars(self) -> &'static [char] {
        match self {
            Platform::Windows => WINDOWS_INVALID_CHARS,
            Platform::Unix => UNIX_INVALID_CHARS,
        }
    }
}

/// Reason a proposed name was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NameRejection {
    #[error("name cannot be empty")]
    Empty,
    #[error("name contains invalid characters or path separators")]
    InvalidCharacters,
    #[error("'.' and '..' are reserved references")]
    ReservedReference,
    #[error("name is a reserved device name on Windows")]
    ReservedDeviceName,
}

/// Validates a proposed directory name
///
/// # Returns
///
/// * `Ok(String)` - The canonical name: the input with surrounding whitespace
///   trimmed, case preserved
/// * `Err(NameRejection)` - The first rule the name violates
///
/// # Validation Rules
///
/// 1. **Non-empty** after trimming
/// 2. **Characters**: no character the platform forbids, and never `/` or `\`
/// 3. **References**: not `.` or `..`
/// 4. **Devices** (Windows only): not `CON`, `PRN`, `AUX`, `NUL`, `COM1`-`COM9`
///    or `LPT1`-`LPT9`, ignoring case and trailing dots or spaces, and not one
///    of those followed by `.`, `:` or whitespace
///
/// # Examples
///
/// ```rust
/// use dirpick::core::{validate_directory_name, NameRejection, Platform};
///
/// assert_eq!(validate_directory_name("  reports ", Platform::Unix), Ok("reports".to_string()));
/// assert_eq!(validate_directory_name("a/b", Platform::Unix), Err(NameRejection::InvalidCharacters));
/// assert_eq!(validate_directory_name("CON", Platform::Windows), Err(NameRejection::ReservedDeviceName));
/// assert!(validate_directory_name("CON", Platform::Unix).is_ok());
/// ```
pub fn validate_directory_name(name: &str, platform: Platform) -> Result<String, NameRejection> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(NameRejection::Empty);
    }

    let invalid = platform.invalid_chars();
    if trimmed
        .chars()
        .any(|ch| PATH_SEPARATORS.contains(&ch) || invalid.contains(&ch))
    {
        return Err(NameRejection::InvalidCharacters);
    }

    // Control characters are illegal in Windows file names
    if platform == Platform::Windows && trimmed.chars().any(|ch| (ch as u32) < 0x20) {
        return Err(NameRejection::InvalidCharacters);
    }

    if RESERVED_REFERENCES.contains(&trimmed) {
        return Err(NameRejection::ReservedReference);
    }

    if platform == Platform::Windows && is_reserved_device_name(trimmed) {
        return Err(NameRejection::ReservedDeviceName);
    }

    Ok(trimmed.to_string())
}

/// Checks a name against the Windows device names
fn is_reserved_device_name(name: &str) -> bool {
    let stripped = name.trim_end_matches(['.', ' ']).to_uppercase();
    if WINDOWS_RESERVED_DEVICE_NAMES.contains(&stripped.as_str()) {
        return true;
    }
    device_prefix_pattern().is_match(name)
}

fn device_prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let names = WINDOWS_RESERVED_DEVICE_NAMES.join("|");
        Regex::new(&format!(r"(?i)^({names})(\.|:|\s)")).expect("device name pattern is valid")
    })
}
