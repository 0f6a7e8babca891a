//! Top-level constants.

/// Default limit on how many aggregates, variants and sequences an input
/// archive may have open at once.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Wire format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Text = 0,
    Binary = 1,
}

impl Format {
    /// Short stable name of the format.
    pub fn id(self) -> &'static str {
        match self {
            Format::Text => "json",
            Format::Binary => "binary",
        }
    }
}
