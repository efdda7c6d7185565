//! Configuration for a dump run
//!
//! - JSON config file loading with per-field fallback to defaults
//! - Built-in ignore list covering VCS metadata, build output, and binaries
//! - Default config file generation for `--write-default-config`

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::log::Reporter;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for one dump run.
///
/// Every field has a default, so a config file only needs the keys it wants
/// to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    /// Glob patterns excluding files and directories from the dump
    pub ignore_patterns: Vec<String>,
    /// When non-empty, only files matching one of these globs are dumped
    pub include_patterns: Vec<String>,
    /// Token budget per output file
    pub max_tokens_per_file: usize,
    /// tiktoken encoding used for counting
    pub encoding_name: String,
    /// Output file name prefix
    pub output_prefix: String,
    /// Output file name extension
    pub output_extension: String,
    /// Directory the dump files are written to
    pub output_directory: String,
    /// Fence marker opening each file block
    pub code_block_style: String,
    /// Directory to crawl
    pub root_dir: String,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            ignore_patterns: default_ignore_patterns(),
            include_patterns: Vec::new(),
            max_tokens_per_file: 100_000,
            encoding_name: "cl100k_base".to_string(),
            output_prefix: "code_dump_".to_string(),
            output_extension: ".txt".to_string(),
            output_directory: "code_dumps".to_string(),
            code_block_style: "```".to_string(),
            root_dir: ".".to_string(),
        }
    }
}

fn default_ignore_patterns() -> Vec<String> {
    [
        // Git files
        ".git/",
        "**/.git/**",
        ".gitignore",
        "**/.gitignore",
        ".gitmodules",
        "**/.gitmodules",
        ".gitattributes",
        "**/.gitattributes",
        // Build directories
        "node_modules/",
        "**/node_modules/**",
        "build/",
        "**/build/**",
        "dist/",
        "**/dist/**",
        "target/",
        "**/target/**",
        "__pycache__/",
        "**/__pycache__/**",
        "**/*.pyc",
        "**/*.pyo",
        "**/*.pyd",
        "**/*.so",
        "**/*.dll",
        "**/*.class",
        // Virtual environments
        "venv/",
        "**/venv/**",
        ".env/",
        "**/.env/**",
        "env/",
        "**/env/**",
        ".venv/",
        "**/.venv/**",
        // IDE files
        ".idea/",
        "**/.idea/**",
        ".vscode/",
        "**/.vscode/**",
        "**/*.swp",
        "**/*.swo",
        "**/.DS_Store",
        // Package files
        "**/package-lock.json",
        "**/yarn.lock",
        "**/*.egg-info/**",
        // Log and temp files
        "**/*.log",
        "tmp/",
        "**/tmp/**",
        "temp/",
        "**/temp/**",
        "**/*.tmp",
        // Large data files
        "**/*.csv",
        "**/*.parquet",
        "**/*.db",
        "**/*.sqlite",
        "**/*.sqlite3",
        // Media files
        "**/*.jpg",
        "**/*.jpeg",
        "**/*.png",
        "**/*.gif",
        "**/*.ico",
        "**/*.mp3",
        "**/*.mp4",
        "**/*.wav",
        "**/*.avi",
        // Archives
        "**/*.zip",
        "**/*.tar",
        "**/*.gz",
        "**/*.rar",
        // This tool's own output
        "code_dump_*.txt",
        "code_dumps/",
        "**/code_dumps/**",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl DumpConfig {
    /// Read a config file, filling unspecified keys from the defaults.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the default configuration as pretty-printed JSON.
    pub fn write_default(path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&Self::default())?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Resolve the effective configuration for a run.
///
/// A missing or unreadable config file is not fatal: the defaults are used
/// and the problem is logged.
pub fn load_config(path: Option<&Path>, reporter: Reporter) -> DumpConfig {
    let path = match path {
        Some(path) if path.exists() => path,
        _ => return DumpConfig::default(),
    };

    match DumpConfig::load_file(path) {
        Ok(config) => {
            reporter.info(&format!("Loaded configuration from {}", path.display()));
            config
        }
        Err(e) => {
            reporter.error(&format!(
                "Error loading config from {}: {}",
                path.display(),
                e
            ));
            reporter.info("Using default configuration");
            DumpConfig::default()
        }
    }
}
