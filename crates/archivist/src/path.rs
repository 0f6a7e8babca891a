//! Field keys and the key-path an archive keeps while it descends.

use std::fmt;

use crate::error::{ArchiveError, ErrorKind};

/// Correlates a field with its encoded slot.
///
/// Keyed backends (text) address the slot by name. Positional backends
/// (binary) ignore the name on the wire and only use it to report where a
/// failure happened. Sequence elements, variant-free roots and other
/// positional slots use [`FieldKey::ELEMENT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldKey(Option<&'static str>);

impl FieldKey {
    /// The unnamed key used for sequence elements and root values.
    pub const ELEMENT: FieldKey = FieldKey(None);

    pub const fn named(name: &'static str) -> Self {
        FieldKey(Some(name))
    }

    pub fn name(self) -> Option<&'static str> {
        self.0
    }

    pub fn is_named(self) -> bool {
        self.0.is_some()
    }
}

impl From<&'static str> for FieldKey {
    fn from(name: &'static str) -> Self {
        FieldKey::named(name)
    }
}

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(&'static str),
    Index(usize),
}

/// Location of a value inside the root, rendered as `$.position[2]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> Self {
        FieldPath(Vec::new())
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(name) => write!(f, ".{name}")?,
                PathSegment::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        FieldPath(iter.into_iter().map(Into::into).collect())
    }
}

impl From<&'static str> for PathSegment {
    fn from(name: &'static str) -> Self {
        PathSegment::Key(name)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Cursor state shared by every backend: the path from the root to the
/// value currently being visited.
#[derive(Debug, Default)]
pub(crate) struct KeyPath {
    path: FieldPath,
    depth: usize,
}

impl KeyPath {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Enters `key` if it is named. Returns whether a segment was pushed, to
    /// be handed back to [`KeyPath::leave`].
    pub(crate) fn enter(&mut self, key: FieldKey) -> bool {
        match key.name() {
            Some(name) => {
                self.path.push(PathSegment::Key(name));
                true
            }
            None => false,
        }
    }

    pub(crate) fn leave(&mut self, entered: bool) {
        if entered {
            self.path.pop();
        }
    }

    pub(crate) fn enter_index(&mut self, index: usize) {
        self.path.push(PathSegment::Index(index));
    }

    pub(crate) fn leave_index(&mut self) {
        self.path.pop();
    }

    /// Opens one level of nesting, failing at `key` once `max` levels are
    /// already open. Pair with [`KeyPath::ascend`].
    pub(crate) fn descend(&mut self, key: FieldKey, max: usize) -> Result<(), ArchiveError> {
        if self.depth >= max {
            return Err(self.error_at(
                key,
                ErrorKind::MalformedInput(format!("nesting exceeds max_depth {max}")),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Builds an error located at the current position.
    pub(crate) fn error(&self, kind: ErrorKind) -> ArchiveError {
        ArchiveError::new(kind, self.path.clone())
    }

    /// Builds an error located at `key` below the current position.
    pub(crate) fn error_at(&self, key: FieldKey, kind: ErrorKind) -> ArchiveError {
        let mut path = self.path.clone();
        if let Some(name) = key.name() {
            path.push(PathSegment::Key(name));
        }
        ArchiveError::new(kind, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_keys_and_indices() {
        let path: FieldPath = [
            PathSegment::Key("scene"),
            PathSegment::Key("position"),
            PathSegment::Index(2),
        ]
        .into_iter()
        .collect();
        assert_eq!(path.to_string(), "$.scene.position[2]");
        assert_eq!(FieldPath::root().to_string(), "$");
    }

    #[test]
    fn unnamed_keys_do_not_extend_the_path() {
        let mut kp = KeyPath::new();
        let entered = kp.enter(FieldKey::named("items"));
        kp.enter_index(0);
        let inner = kp.enter(FieldKey::ELEMENT);
        assert!(!inner);
        let err = kp.error(ErrorKind::MissingRequiredKey("id"));
        assert_eq!(err.path().to_string(), "$.items[0]");
        kp.leave(inner);
        kp.leave_index();
        kp.leave(entered);
        assert!(kp.error(ErrorKind::MissingRequiredKey("id")).path().is_root());
    }

    #[test]
    fn descend_fails_once_the_limit_is_reached() {
        let mut kp = KeyPath::new();
        assert!(kp.descend(FieldKey::ELEMENT, 2).is_ok());
        let entered = kp.enter(FieldKey::named("a"));
        assert!(kp.descend(FieldKey::named("b"), 2).is_ok());
        let err = kp.descend(FieldKey::named("c"), 2).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::MalformedInput("nesting exceeds max_depth 2".to_owned())
        );
        assert_eq!(err.path().to_string(), "$.a.c");
        kp.ascend();
        kp.leave(entered);
        assert!(kp.descend(FieldKey::ELEMENT, 2).is_ok());
    }
}
