//! Filter module - decides which paths enter the dump
//!
//! - Glob rule sets for ignore and include lists
//! - .gitignore loading at the crawl root

pub mod gitignore;
pub mod pattern;
