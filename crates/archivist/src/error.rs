//! Archive error type.

use thiserror::Error;

use crate::path::FieldPath;
use crate::variant::Tag;

/// What went wrong, independent of where.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is structurally invalid for the expected value.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// The binary input ended before the value was complete.
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },
    /// A non-optional field has no key in the text input.
    #[error("missing required key `{0}`")]
    MissingRequiredKey(&'static str),
    /// A variant tag outside the closed alternative set.
    #[error("unknown discriminant {0}")]
    UnknownDiscriminant(Tag),
    /// A text value is present but has the wrong native shape or range.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The value cannot be expressed in the target format.
    #[error("unrepresentable value: {0}")]
    Unrepresentable(String),
}

/// A failed encode or decode, with the path of the field that failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} at `{path}`")]
pub struct ArchiveError {
    kind: ErrorKind,
    path: FieldPath,
}

impl ArchiveError {
    pub fn new(kind: ErrorKind, path: FieldPath) -> Self {
        Self { kind, path }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self.kind, ErrorKind::TruncatedInput { .. })
    }
}
