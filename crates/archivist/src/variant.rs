//! Tagged-union codec shared by both backends.
//!
//! Every alternative of a closed variant set carries a discriminant that is
//! assigned by the type author and never derived from declaration order, so
//! adding or reordering alternatives leaves existing encodings valid.
//!
//! Wire shapes:
//!
//! - binary: `{tag: u8 | u16}{payload}`, width fixed per type by
//!   [`Variant::TAG_WIDTH`];
//! - text: `{"tag": <number>, "value": <payload>}`, with `"value"` omitted
//!   for alternatives without payload.

use archivist_buffers::{BufferError, Reader, Writer};

use crate::archive::Archive;
use crate::error::{ArchiveError, ErrorKind};
use crate::field::Field;

/// A variant discriminant.
pub type Tag = u16;

/// Text key holding the discriminant.
pub const TAG_KEY: &str = "tag";

/// Text key holding the payload.
pub const VALUE_KEY: &str = "value";

/// Binary width of a variant's discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagWidth {
    U8,
    U16,
}

impl TagWidth {
    pub fn max(self) -> Tag {
        match self {
            TagWidth::U8 => u8::MAX as Tag,
            TagWidth::U16 => Tag::MAX,
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            TagWidth::U8 => 1,
            TagWidth::U16 => 2,
        }
    }
}

/// A closed sum type with stable, explicitly assigned discriminants.
///
/// ```
/// use archivist::{Archive, ArchiveError, Tag, Variant};
///
/// #[derive(Debug, PartialEq)]
/// enum Value {
///     Int(i32),
///     Text(String),
/// }
///
/// impl Default for Value {
///     fn default() -> Self {
///         Value::Int(0)
///     }
/// }
///
/// impl Variant for Value {
///     const TAGS: &'static [Tag] = &[1, 2];
///
///     fn tag(&self) -> Tag {
///         match self {
///             Value::Int(_) => 1,
///             Value::Text(_) => 2,
///         }
///     }
///
///     fn with_tag(tag: Tag) -> Option<Self> {
///         match tag {
///             1 => Some(Value::Int(0)),
///             2 => Some(Value::Text(String::new())),
///             _ => None,
///         }
///     }
///
///     fn describe_payload<A: Archive>(&mut self, ar: &mut A) -> Result<(), ArchiveError> {
///         match self {
///             Value::Int(v) => archivist::variant::payload(ar, v),
///             Value::Text(v) => archivist::variant::payload(ar, v),
///         }
///     }
/// }
/// archivist::impl_field!(Value => variant);
///
/// let mut v = Value::Int(42);
/// let bytes = archivist::binary::to_bytes(&mut v).unwrap();
/// assert_eq!(bytes, vec![1, 0, 0, 0, 42]);
/// assert_eq!(archivist::binary::from_bytes::<Value>(&bytes).unwrap(), v);
/// ```
pub trait Variant: Sized {
    /// Binary width of the discriminant.
    const TAG_WIDTH: TagWidth = TagWidth::U8;

    /// Every discriminant this type can decode.
    const TAGS: &'static [Tag];

    /// Discriminant of the active alternative.
    fn tag(&self) -> Tag;

    /// The alternative for `tag` holding a default payload, or `None` if the
    /// tag is not part of the set.
    fn with_tag(tag: Tag) -> Option<Self>;

    /// Describes the active alternative's payload, if any.
    fn describe_payload<A: Archive>(&mut self, ar: &mut A) -> Result<(), ArchiveError>;
}

/// Describes a single-value payload under [`VALUE_KEY`].
pub fn payload<A: Archive, T: Field>(ar: &mut A, value: &mut T) -> Result<(), ArchiveError> {
    ar.field(VALUE_KEY, value)
}

/// The active tag of `value`, checked against the declared width.
pub(crate) fn checked_tag<V: Variant>(value: &V) -> Result<Tag, ErrorKind> {
    let tag = value.tag();
    if tag > V::TAG_WIDTH.max() {
        return Err(ErrorKind::Unrepresentable(format!(
            "discriminant {tag} does not fit in {} byte(s)",
            V::TAG_WIDTH.bytes()
        )));
    }
    Ok(tag)
}

/// The blank alternative for a decoded tag.
pub(crate) fn resolve<V: Variant>(tag: Tag) -> Result<V, ErrorKind> {
    V::with_tag(tag).ok_or(ErrorKind::UnknownDiscriminant(tag))
}

pub(crate) fn write_tag(writer: &mut Writer, width: TagWidth, tag: Tag) {
    match width {
        TagWidth::U8 => writer.u8(tag as u8),
        TagWidth::U16 => writer.u16(tag),
    }
}

pub(crate) fn read_tag(reader: &mut Reader<'_>, width: TagWidth) -> Result<Tag, BufferError> {
    match width {
        TagWidth::U8 => reader.u8().map(Tag::from),
        TagWidth::U16 => reader.u16(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_width_bounds() {
        assert_eq!(TagWidth::U8.max(), 255);
        assert_eq!(TagWidth::U16.max(), u16::MAX);
    }

    #[test]
    fn u8_tags_are_one_byte() {
        let mut w = Writer::new();
        write_tag(&mut w, TagWidth::U8, 200);
        write_tag(&mut w, TagWidth::U16, 0x0102);
        let data = w.flush();
        assert_eq!(data, vec![200, 0x01, 0x02]);

        let mut r = Reader::new(&data);
        assert_eq!(read_tag(&mut r, TagWidth::U8), Ok(200));
        assert_eq!(read_tag(&mut r, TagWidth::U16), Ok(0x0102));
    }
}
