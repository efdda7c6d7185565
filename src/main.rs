//! codedump - A CLI tool that packs a source tree into token-budgeted dump files
//!
//! codedump provides:
//! - Directory crawling with configurable ignore patterns and .gitignore support
//! - Binary file detection so dumps stay paste-safe text
//! - tiktoken-based token budgeting across sequential dump files
//! - A JSON stats report summarizing every run

use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod core;
mod dump;
mod filter;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
