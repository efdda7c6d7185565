//! Dump module - turns a source tree into budgeted dump files
//!
//! - Directory crawl with pruning and per-file classification
//! - Token-budgeted chunk accumulation
//! - Sequential artifact output plus the stats report

pub mod chunker;
pub mod crawler;
pub mod stats;
pub mod writer;
