//! The value descriptor protocol.

use crate::archive::Archive;
use crate::error::ArchiveError;

/// An aggregate that can describe its fields to any [`Archive`].
///
/// `describe` issues one archive call per field, always in the same order.
/// The one implementation serves encoding and decoding for every backend, so
/// it must not branch on the archive's direction or format.
///
/// ```
/// use archivist::{Archive, ArchiveError, Describe};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Player {
///     id: u32,
///     name: String,
///     position: Vec<f32>,
/// }
///
/// impl Describe for Player {
///     fn describe<A: Archive>(&mut self, ar: &mut A) -> Result<(), ArchiveError> {
///         ar.field("id", &mut self.id)?;
///         ar.field("name", &mut self.name)?;
///         ar.field("position", &mut self.position)
///     }
/// }
/// archivist::impl_field!(Player => nested);
///
/// let mut player = Player { id: 1, name: "Alice".into(), position: vec![10.0, 20.0, 30.0] };
/// let text = archivist::text::to_string(&mut player).unwrap();
/// assert_eq!(text, r#"{"id":1,"name":"Alice","position":[10.0,20.0,30.0]}"#);
/// ```
pub trait Describe {
    fn describe<A: Archive>(&mut self, ar: &mut A) -> Result<(), ArchiveError>;
}
