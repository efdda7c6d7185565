//! Path normalization utilities
//!
//! Ensures all paths are normalized to use '/' as separator and are relative
//! to the scan root before any pattern matching happens.

use std::path::Path;

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Normalize a relative path string for pattern matching: forward slashes
/// only, empty and `.` segments dropped.
pub fn normalize_match_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}
