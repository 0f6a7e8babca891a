//! Common codec trait.

use crate::error::ArchiveError;
use crate::field::Field;
use crate::Format;

/// A wire format bound to its options.
pub trait ValueCodec {
    fn id(&self) -> &'static str;
    fn format(&self) -> Format;
    /// Encodes `value`, which is only read.
    fn encode<T: Field>(&self, value: &mut T) -> Result<Vec<u8>, ArchiveError>;
    fn decode<T: Field>(&self, bytes: &[u8]) -> Result<T, ArchiveError>;
}
