//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::config::{load_config, DumpConfig};
use crate::core::log::Reporter;
use crate::dump::crawler::run_crawl;
use crate::filter::gitignore::load_gitignore;

/// File name used by `--write-default-config`
pub const DEFAULT_CONFIG_FILE: &str = "code_dump_config.json";

/// codedump - pack a source tree into token-budgeted dump files.
#[derive(Parser, Debug)]
#[command(name = "codedump")]
#[command(
    author,
    version,
    about,
    long_about = r#"codedump crawls a directory tree and concatenates every text file into a
sequence of dump files, each bounded by a token budget, so a whole project can
be pasted into an LLM context window piece by piece.

Files are filtered through an ignore list (plus the root .gitignore), binary
files are detected and skipped, and every file is wrapped in a fenced block
with its relative path. A stats report with the run's counters is written next
to the dump files.

Examples:
    codedump
    codedump --directory /path/to/project --tokens 50000
    codedump --config code_dump_config.json
    codedump --output my_project_ --output-dir ./my_dumps
    codedump --write-default-config
"#
)]
pub struct Cli {
    /// Path to a JSON configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        long_help = "Path to a JSON configuration file. Any key omitted from the file falls\n\
back to its built-in default, so a config only needs the keys it overrides.\n\n\
Generate a complete template with --write-default-config."
    )]
    pub config: Option<PathBuf>,

    /// Root directory to crawl.
    #[arg(
        short,
        long,
        value_name = "DIR",
        long_help = "Root directory to crawl (defaults to the current directory).\n\n\
Paths in dump files and log messages are shown relative to this root.\n\
Overrides root_dir from the config file."
    )]
    pub directory: Option<String>,

    /// Maximum tokens per dump file.
    #[arg(
        short,
        long,
        value_name = "N",
        long_help = "Maximum tokens per dump file. A single file larger than this budget is\n\
still dumped whole, alone in its own dump file, rather than split or dropped.\n\
Overrides max_tokens_per_file from the config file."
    )]
    pub tokens: Option<usize>,

    /// Output file name prefix.
    #[arg(
        short,
        long,
        value_name = "PREFIX",
        long_help = "Prefix for output file names. Dump files are named\n\
<PREFIX>1<ext>, <PREFIX>2<ext>, ... and the report <PREFIX>stats.json.\n\
Overrides output_prefix from the config file."
    )]
    pub output: Option<String>,

    /// Directory the dump files are written to.
    #[arg(
        long,
        value_name = "DIR",
        long_help = "Directory the dump files and the stats report are written to. Created\n\
if it does not exist. Overrides output_directory from the config file."
    )]
    pub output_dir: Option<String>,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        long_help = "Enable more detailed diagnostics, including one line per skipped file.\n\
This may increase stderr output considerably on large trees."
    )]
    pub verbose: bool,

    /// Quiet mode (warnings and errors only).
    #[arg(
        short,
        long,
        long_help = "Suppress progress output. Warnings and errors are still printed."
    )]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(
        long,
        long_help = "Disable colored log output. This is useful when piping stderr to files\n\
or when your terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Write the default configuration to code_dump_config.json and exit.
    #[arg(
        long,
        long_help = "Write the built-in default configuration to code_dump_config.json in the\n\
current directory and exit without crawling. Edit the file, then pass it back\n\
with --config."
    )]
    pub write_default_config: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    let reporter = Reporter::new(cli.verbose, cli.quiet);

    if cli.write_default_config {
        DumpConfig::write_default(Path::new(DEFAULT_CONFIG_FILE))
            .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;
        reporter.info(&format!(
            "Default configuration written to {}",
            DEFAULT_CONFIG_FILE
        ));
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref(), reporter);
    if let Some(directory) = cli.directory {
        config.root_dir = directory;
    }
    if let Some(tokens) = cli.tokens {
        config.max_tokens_per_file = tokens;
    }
    if let Some(output) = cli.output {
        config.output_prefix = output;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_directory = output_dir;
    }

    config
        .ignore_patterns
        .extend(load_gitignore(Path::new(&config.root_dir), reporter));

    run_crawl(&config, reporter)?;
    Ok(())
}
