//! Dump file output
//!
//! Owns the output directory and hands out sequential file names
//! (`<prefix>1<ext>`, `<prefix>2<ext>`, ...) plus the `<prefix>stats.json`
//! report.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::log::Reporter;
use crate::dump::chunker::SealedChunk;
use crate::dump::stats::RunReport;

pub struct ArtifactWriter {
    dir: PathBuf,
    prefix: String,
    extension: String,
    next_index: usize,
    reporter: Reporter,
}

impl ArtifactWriter {
    /// Create the output directory and a writer rooted in it.
    pub fn new(dir: &Path, prefix: &str, extension: &str, reporter: Reporter) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
            extension: extension.to_string(),
            next_index: 1,
            reporter,
        })
    }

    /// Write a sealed chunk under the next sequential file name.
    pub fn write_chunk(&mut self, chunk: &SealedChunk) -> Result<()> {
        let path = self
            .dir
            .join(format!("{}{}{}", self.prefix, self.next_index, self.extension));
        fs::write(&path, &chunk.content)
            .with_context(|| format!("Failed to write dump file: {}", path.display()))?;
        self.reporter
            .info(&format!("Wrote {} with {} tokens", path.display(), chunk.tokens));
        self.next_index += 1;
        Ok(())
    }

    /// Write the stats report next to the dump files.
    pub fn write_report(&self, report: &RunReport) -> Result<()> {
        let path = self.dir.join(format!("{}stats.json", self.prefix));
        let content = serde_json::to_string_pretty(report)
            .context("Failed to serialize stats report")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write stats report: {}", path.display()))?;
        Ok(())
    }
}
