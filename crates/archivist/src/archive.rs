//! The archive capability set every backend implements.

use crate::describe::Describe;
use crate::error::ArchiveError;
use crate::field::Field;
use crate::path::FieldKey;
use crate::primitive::Primitive;
use crate::variant::Variant;

/// Which way values flow through an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Values are read from `&mut T` and written to the wire.
    Output,
    /// Values are reconstructed from the wire into `&mut T`.
    Input,
}

/// A direction- and format-bound cursor with one operation per value kind.
///
/// The same `describe` implementation drives every archive: an output
/// archive only reads through the `&mut` references it is handed, an input
/// archive overwrites them. Operations on an input archive fail as soon as
/// the source cannot satisfy them; the error carries the path of the failing
/// field and must be propagated with `?` so the whole traversal aborts.
///
/// Keys name the slot in keyed formats and are ignored on the wire by
/// positional ones. Type authors normally call [`Archive::field`] and let
/// the [`Field`] impl pick the operation.
pub trait Archive: Sized {
    fn direction(&self) -> Direction;

    /// Integers, floats and booleans.
    fn primitive<P: Primitive>(&mut self, key: FieldKey, value: &mut P) -> Result<(), ArchiveError>;

    /// UTF-8 text.
    fn string(&mut self, key: FieldKey, value: &mut String) -> Result<(), ArchiveError>;

    /// Presence, then the payload if present.
    fn optional<T: Field>(
        &mut self,
        key: FieldKey,
        value: &mut Option<T>,
    ) -> Result<(), ArchiveError>;

    /// Element count, then every element through `visit`.
    ///
    /// On input the destination is cleared and pre-sized before the first
    /// element is visited; each element starts out as `T::default()`.
    fn sequence<T, F>(
        &mut self,
        key: FieldKey,
        value: &mut Vec<T>,
        visit: F,
    ) -> Result<(), ArchiveError>
    where
        T: Default,
        F: FnMut(&mut Self, &mut T) -> Result<(), ArchiveError>;

    /// Stable discriminant, then the active alternative's payload.
    fn variant<V: Variant>(&mut self, key: FieldKey, value: &mut V) -> Result<(), ArchiveError>;

    /// An aggregate described by its own [`Describe`] impl.
    fn nested<T: Describe>(&mut self, key: FieldKey, value: &mut T) -> Result<(), ArchiveError>;

    /// Visits `value` with the operation its type declares.
    fn field<T: Field>(
        &mut self,
        key: impl Into<FieldKey>,
        value: &mut T,
    ) -> Result<(), ArchiveError> {
        T::visit(self, key.into(), value)
    }

    fn is_input(&self) -> bool {
        self.direction() == Direction::Input
    }
}
