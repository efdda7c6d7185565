//! Run diagnostics reporter
//!
//! All progress and diagnostic output goes through a Reporter that is built
//! once from the CLI flags and passed explicitly to every component that
//! reports. Messages go to stderr; dump artifacts never depend on it.
//!
//! Levels:
//! - debug: per-file decisions, printed only with --verbose
//! - info: progress messages, suppressed by --quiet
//! - warn/error: always printed

use chrono::Local;
use colored::{ColoredString, Colorize};

/// Stderr reporter carrying the run's verbosity settings
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    verbose: bool,
    quiet: bool,
}

impl Reporter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Per-file diagnostics, only visible in verbose mode
    pub fn debug(&self, message: &str) {
        if self.verbose && !self.quiet {
            emit("DEBUG".dimmed(), message);
        }
    }

    /// Progress output, suppressed in quiet mode
    pub fn info(&self, message: &str) {
        if !self.quiet {
            emit("INFO".normal(), message);
        }
    }

    pub fn warn(&self, message: &str) {
        emit("WARN".yellow(), message);
    }

    pub fn error(&self, message: &str) {
        emit("ERROR".red(), message);
    }
}

fn emit(level: ColoredString, message: &str) {
    eprintln!("{} {} {}", Local::now().format("%H:%M:%S"), level, message);
}
