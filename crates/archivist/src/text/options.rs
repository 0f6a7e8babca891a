//! Text backend configuration.

use crate::constants::DEFAULT_MAX_DEPTH;

/// Options for producing and reading text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    /// Indent the output instead of emitting compact JSON.
    pub pretty: bool,
    /// Write absent optionals as `null` instead of omitting their key.
    pub null_for_absent: bool,
    /// Deepest nesting of aggregates, variants and sequences a reader accepts.
    pub max_depth: usize,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            null_for_absent: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_null_for_absent(mut self, null_for_absent: bool) -> Self {
        self.null_for_absent = null_for_absent;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
