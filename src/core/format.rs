//! Formatted file blocks
//!
//! Renders one file's content into the delimited, language-tagged block that
//! dump files are concatenated from.

use std::fs;
use std::path::Path;

use crate::core::language::language_for_path;
use crate::core::log::Reporter;

/// Width of the `=` separator lines around each file header
const SEPARATOR_WIDTH: usize = 80;

/// Render one file into a delimited block and count its content lines.
///
/// The block is: separator, `FILE:` header, separator, opening fence (with a
/// language tag when the extension is known), the content verbatim, closing
/// fence, trailing blank line. The returned count is the content's line
/// count, not the block's.
///
/// A file that cannot be read as UTF-8 still yields a block: a one-line
/// error marker with a line count of zero, so the crawl keeps going and the
/// failure is visible in the dump itself.
pub fn format_file(
    path: &Path,
    rel_path: &str,
    block_style: &str,
    reporter: Reporter,
) -> (String, usize) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            reporter.error(&format!("Error reading file {}: {}", rel_path, e));
            return (format!("# ERROR: Could not read {}: {}\n\n", rel_path, e), 0);
        }
    };

    let lines = content.lines().count();

    let fence_open = match language_for_path(path) {
        Some(lang) => format!("{}{}", block_style, lang),
        None => block_style.to_string(),
    };

    let separator = "=".repeat(SEPARATOR_WIDTH);
    let mut block = String::with_capacity(content.len() + 256);
    block.push_str(&separator);
    block.push('\n');
    block.push_str("FILE: ");
    block.push_str(rel_path);
    block.push('\n');
    block.push_str(&separator);
    block.push('\n');
    block.push_str(&fence_open);
    block.push('\n');
    block.push_str(&content);
    block.push('\n');
    block.push_str(block_style);
    block.push_str("\n\n");

    (block, lines)
}
