//! .gitignore loading
//!
//! Reads the `.gitignore` at the crawl root and folds its patterns into the
//! ignore list. Only simple patterns are honored: comments and negations
//! (`!pattern`) are dropped, and nested `.gitignore` files are not consulted.

use std::fs;
use std::path::Path;

use crate::core::log::Reporter;

/// Collect usable patterns from `<root>/.gitignore`, if present.
pub fn load_gitignore(root: &Path, reporter: Reporter) -> Vec<String> {
    let path = root.join(".gitignore");
    if !path.exists() {
        return Vec::new();
    }

    reporter.info(&format!("Loading .gitignore from {}", path.display()));
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            reporter.warn(&format!(
                "Could not read .gitignore at {}: {}",
                path.display(),
                e
            ));
            return Vec::new();
        }
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('!'))
        .map(str::to_string)
        .collect()
}
