//! Run statistics and the stats report
//!
//! Every file the crawl considers is classified exactly once, so the
//! counters always satisfy `total = included + ignored + binary`. Line and
//! token totals cover included files only.

use serde::{Deserialize, Serialize};

/// How the crawl classified one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    Included,
    Ignored,
    Binary,
}

/// One classified file, as fed into the stats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub rel_path: String,
    pub class: FileClass,
    pub lines: usize,
    pub tokens: usize,
}

impl FileRecord {
    pub fn included(rel_path: &str, lines: usize, tokens: usize) -> Self {
        Self {
            rel_path: rel_path.to_string(),
            class: FileClass::Included,
            lines,
            tokens,
        }
    }

    pub fn ignored(rel_path: &str) -> Self {
        Self {
            rel_path: rel_path.to_string(),
            class: FileClass::Ignored,
            lines: 0,
            tokens: 0,
        }
    }

    pub fn binary(rel_path: &str) -> Self {
        Self {
            rel_path: rel_path.to_string(),
            class: FileClass::Binary,
            lines: 0,
            tokens: 0,
        }
    }
}

/// Aggregated counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub total_files: usize,
    pub included_files: usize,
    pub ignored_files: usize,
    pub binary_files: usize,
    pub total_lines: usize,
    pub total_tokens: usize,
    pub dump_files_created: usize,
}

impl RunStats {
    pub fn record(&mut self, file: &FileRecord) {
        self.total_files += 1;
        match file.class {
            FileClass::Included => {
                self.included_files += 1;
                self.total_lines += file.lines;
                self.total_tokens += file.tokens;
            }
            FileClass::Ignored => self.ignored_files += 1,
            FileClass::Binary => self.binary_files += 1,
        }
    }
}

/// The JSON report written next to the dump files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub stats: RunStats,
    pub elapsed_time_seconds: f64,
    pub config: ReportConfig,
}

/// The run settings echoed into the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub root_dir: String,
    pub max_tokens_per_file: usize,
    pub encoding_name: String,
    pub output_directory: String,
}
