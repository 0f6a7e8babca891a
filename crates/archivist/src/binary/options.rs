//! Binary backend configuration.

use crate::constants::DEFAULT_MAX_DEPTH;

/// Default upper bound for string lengths and sequence counts.
pub const DEFAULT_MAX_LEN: u32 = 1 << 24;

/// Limits applied when writing and reading binary archives.
///
/// `max_len` is enforced on both sides so anything a writer accepts can be
/// read back by a reader with equal options. `max_depth` only applies to
/// reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryOptions {
    /// Largest accepted string byte length or sequence element count.
    pub max_len: u32,
    /// Deepest accepted nesting of aggregates, variants and sequences.
    pub max_depth: usize,
}

impl Default for BinaryOptions {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BinaryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_len(mut self, max_len: u32) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
