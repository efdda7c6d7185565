//! Core module - Shared building blocks for the dump pipeline
//!
//! This module provides:
//! - Path normalization utilities
//! - The stderr Reporter for diagnostics
//! - Extension to fence-language mapping
//! - Token counting for LLM context budgeting
//! - Formatted file blocks

pub mod format;
pub mod language;
pub mod log;
pub mod paths;
pub mod tokenizer;
