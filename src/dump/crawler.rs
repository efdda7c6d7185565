//! Directory crawl driving the dump pipeline
//!
//! Walks the tree in filesystem enumeration order, prunes ignored
//! directories before descent, classifies every surviving file exactly once
//! (ignored, binary, or included), and feeds included files through the
//! chunker to the writer. Finishes by persisting the stats report.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use walkdir::WalkDir;

use crate::config::DumpConfig;
use crate::core::format::format_file;
use crate::core::log::Reporter;
use crate::core::paths::make_relative;
use crate::core::tokenizer::TokenCounter;
use crate::dump::chunker::Chunker;
use crate::dump::stats::{FileRecord, ReportConfig, RunReport, RunStats};
use crate::dump::writer::ArtifactWriter;
use crate::filter::pattern::{IncludeSet, PatternSet};

/// Bytes decoded when probing a file for binary content
const BINARY_PROBE_BYTES: u64 = 1024;

/// Crawl `config.root_dir` and write the dump files and stats report.
///
/// An unreadable or missing root is not fatal: the walk simply yields
/// nothing and the run completes with empty statistics.
pub fn run_crawl(config: &DumpConfig, reporter: Reporter) -> Result<RunStats> {
    let root = Path::new(&config.root_dir);
    let ignore = PatternSet::new(&config.ignore_patterns, reporter);
    let include = IncludeSet::new(&config.include_patterns, reporter);
    let counter = TokenCounter::for_encoding(&config.encoding_name, reporter);

    let start = Instant::now();
    reporter.info(&format!("Starting code crawl in {}", display_absolute(root)));

    let out_dir = Path::new(&config.output_directory);
    let mut writer = ArtifactWriter::new(
        out_dir,
        &config.output_prefix,
        &config.output_extension,
        reporter,
    )?;
    reporter.info(&format!(
        "Output files will be saved to: {}",
        display_absolute(out_dir)
    ));

    let mut stats = RunStats::default();
    let mut chunker = Chunker::new(config.max_tokens_per_file);

    // Ignored directories are pruned here so their contents are never
    // visited; files are only classified in the loop below so they still
    // show up in the counters.
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        match make_relative(entry.path(), root) {
            Some(rel) => !ignore.matches(&rel),
            None => true,
        }
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                reporter.warn(&format!("Skipping unreadable entry: {}", e));
                continue;
            }
        };
        if entry.depth() == 0 || entry.file_type().is_dir() {
            continue;
        }
        let rel = match make_relative(entry.path(), root) {
            Some(rel) => rel,
            None => continue,
        };
        if !entry.path().is_file() {
            reporter.debug(&format!("Skipping non-regular file: {}", rel));
            continue;
        }

        if ignore.matches(&rel) {
            reporter.debug(&format!("Ignoring file: {}", rel));
            stats.record(&FileRecord::ignored(&rel));
            continue;
        }
        if !include.should_include(&rel) {
            reporter.debug(&format!("Not included: {}", rel));
            stats.record(&FileRecord::ignored(&rel));
            continue;
        }
        if is_binary_file(entry.path()) {
            reporter.debug(&format!("Skipping binary file: {}", rel));
            stats.record(&FileRecord::binary(&rel));
            continue;
        }

        reporter.info(&format!("Processing: {}", rel));
        let (block, lines) = format_file(entry.path(), &rel, &config.code_block_style, reporter);
        let tokens = counter.estimate(&block);
        stats.record(&FileRecord::included(&rel, lines, tokens));

        if let Some(sealed) = chunker.append(&block, tokens) {
            writer.write_chunk(&sealed)?;
            stats.dump_files_created += 1;
        }
    }

    if let Some(sealed) = chunker.flush() {
        writer.write_chunk(&sealed)?;
        stats.dump_files_created += 1;
    }

    let elapsed = start.elapsed().as_secs_f64();
    reporter.info(&format!("Code dump completed in {:.2} seconds", elapsed));
    reporter.info("Statistics:");
    reporter.info(&format!("  total_files: {}", stats.total_files));
    reporter.info(&format!("  included_files: {}", stats.included_files));
    reporter.info(&format!("  ignored_files: {}", stats.ignored_files));
    reporter.info(&format!("  binary_files: {}", stats.binary_files));
    reporter.info(&format!("  total_lines: {}", stats.total_lines));
    reporter.info(&format!("  total_tokens: {}", stats.total_tokens));
    reporter.info(&format!(
        "  dump_files_created: {}",
        stats.dump_files_created
    ));

    let report = RunReport {
        stats: stats.clone(),
        elapsed_time_seconds: elapsed,
        config: ReportConfig {
            root_dir: config.root_dir.clone(),
            max_tokens_per_file: config.max_tokens_per_file,
            encoding_name: config.encoding_name.clone(),
            output_directory: config.output_directory.clone(),
        },
    };
    writer.write_report(&report)?;

    Ok(stats)
}

fn display_absolute(path: &Path) -> String {
    path.canonicalize()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.display().to_string())
}

/// Probe the first 1024 bytes for UTF-8 validity.
///
/// A multi-byte sequence cut off by the probe window is not evidence of
/// binary content; a sequence cut off by the end of the file is. Open and
/// read errors answer false so the failure surfaces when the file is read
/// for formatting.
fn is_binary_file(path: &Path) -> bool {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };
    let mut probe = Vec::with_capacity(BINARY_PROBE_BYTES as usize);
    if file.take(BINARY_PROBE_BYTES).read_to_end(&mut probe).is_err() {
        return false;
    }
    match std::str::from_utf8(&probe) {
        Ok(_) => false,
        Err(e) => e.error_len().is_some() || probe.len() < BINARY_PROBE_BYTES as usize,
    }
}
