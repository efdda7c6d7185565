//! File extension to code fence language tags

use std::path::Path;

/// Look up the fence language tag for a file by its extension (lowercased).
/// Returns None for unknown extensions; the fence then carries no tag.
pub fn language_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    let lang = match ext.as_str() {
        // Programming languages
        "py" => "python",
        "js" => "javascript",
        "jsx" => "jsx",
        "ts" => "typescript",
        "tsx" => "tsx",
        "html" => "html",
        "css" => "css",
        "scss" => "scss",
        "less" => "less",
        "php" => "php",
        "java" => "java",
        "c" => "c",
        "cpp" | "h" | "hpp" => "cpp",
        "cs" => "csharp",
        "go" => "go",
        "rb" => "ruby",
        "rs" => "rust",
        "swift" => "swift",
        "kt" | "kts" => "kotlin",
        "scala" => "scala",
        "pl" | "pm" => "perl",
        "sh" | "bash" | "zsh" => "bash",

        // Data and config formats
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "xml" => "xml",
        "md" | "markdown" => "markdown",
        "txt" => "text",
        "csv" => "csv",
        "sql" => "sql",
        "graphql" => "graphql",
        "toml" => "toml",
        "ini" | "cfg" | "conf" => "ini",
        "env" => "text",

        // Build and dependency files
        "gradle" => "gradle",
        "dockerfile" => "dockerfile",
        "lock" => "text",
        "makefile" | "mk" => "makefile",

        _ => return None,
    };
    Some(lang)
}
