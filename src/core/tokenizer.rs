//! Token counting - budget estimation for dump chunking
//!
//! Provides accurate token counting through the tiktoken encodings
//! (cl100k_base by default), with a deterministic chars/4 fallback when the
//! configured encoding is unknown or fails to load. Callers depend only on
//! `estimate`, never on which implementation is active.

use once_cell::sync::Lazy;
use tiktoken_rs::{cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base, CoreBPE};

use crate::core::log::Reporter;

// Lazy-initialized BPE encodings (loaded once on first use)
static CL100K_BPE: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| cl100k_base().map_err(|e| format!("Failed to load cl100k_base: {}", e)));

static O200K_BPE: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| o200k_base().map_err(|e| format!("Failed to load o200k_base: {}", e)));

static P50K_BPE: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| p50k_base().map_err(|e| format!("Failed to load p50k_base: {}", e)));

static P50K_EDIT_BPE: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| p50k_edit().map_err(|e| format!("Failed to load p50k_edit: {}", e)));

static R50K_BPE: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| r50k_base().map_err(|e| format!("Failed to load r50k_base: {}", e)));

/// Token estimator selected by encoding availability
#[derive(Clone, Copy)]
pub enum TokenCounter {
    /// Exact BPE counting through a loaded tiktoken encoding
    Exact(&'static CoreBPE),
    /// Approximate counting at ~4 characters per token
    Heuristic,
}

impl TokenCounter {
    /// Resolve an encoding name to a counter.
    ///
    /// Unknown names and encodings that fail to load fall back to the
    /// heuristic with a single warning; the run never aborts over a
    /// tokenizer.
    pub fn for_encoding(name: &str, reporter: Reporter) -> TokenCounter {
        let bpe = match name {
            "cl100k_base" => CL100K_BPE.as_ref().ok(),
            "o200k_base" => O200K_BPE.as_ref().ok(),
            "p50k_base" => P50K_BPE.as_ref().ok(),
            "p50k_edit" => P50K_EDIT_BPE.as_ref().ok(),
            "r50k_base" | "gpt2" => R50K_BPE.as_ref().ok(),
            _ => None,
        };

        match bpe {
            Some(bpe) => TokenCounter::Exact(bpe),
            None => {
                reporter.warn(&format!(
                    "Encoding {} unavailable. Using approximate count.",
                    name
                ));
                TokenCounter::Heuristic
            }
        }
    }

    /// Estimate the number of tokens in `text`.
    ///
    /// The heuristic path is deterministic and side-effect-free, so repeated
    /// runs over unchanged input always produce the same estimate.
    pub fn estimate(&self, text: &str) -> usize {
        match self {
            TokenCounter::Exact(bpe) => bpe.encode_with_special_tokens(text).len(),
            TokenCounter::Heuristic => text.chars().count() / 4,
        }
    }
}
