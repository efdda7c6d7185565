//! Token-budgeted chunk accumulation
//!
//! Blocks are appended in crawl order and grouped greedily: a chunk is
//! sealed when the next block would push it past the budget. A block larger
//! than the budget still goes out, alone in its own chunk, so no content is
//! ever dropped.

use std::mem;

/// A finished chunk, ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedChunk {
    pub content: String,
    pub tokens: usize,
    pub blocks: usize,
}

/// Accumulates formatted file blocks into budgeted chunks
#[derive(Debug)]
pub struct Chunker {
    budget: usize,
    content: String,
    tokens: usize,
    blocks: usize,
}

impl Chunker {
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            content: String::new(),
            tokens: 0,
            blocks: 0,
        }
    }

    /// Add a block, returning the previous chunk if this block sealed it.
    ///
    /// The block is always accepted; only non-empty chunks seal, so an
    /// over-budget block ends up alone rather than lost.
    pub fn append(&mut self, block: &str, tokens: usize) -> Option<SealedChunk> {
        let sealed = if self.blocks > 0 && self.tokens + tokens > self.budget {
            Some(self.take())
        } else {
            None
        };

        self.content.push_str(block);
        self.tokens += tokens;
        self.blocks += 1;
        sealed
    }

    /// Seal whatever is pending. None when nothing was appended since the
    /// last seal.
    pub fn flush(&mut self) -> Option<SealedChunk> {
        if self.blocks == 0 {
            return None;
        }
        Some(self.take())
    }

    fn take(&mut self) -> SealedChunk {
        SealedChunk {
            content: mem::take(&mut self.content),
            tokens: mem::replace(&mut self.tokens, 0),
            blocks: mem::replace(&mut self.blocks, 0),
        }
    }
}
