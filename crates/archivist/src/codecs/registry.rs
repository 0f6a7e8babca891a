//! Aggregate codec holder.

use super::{BinaryCodec, TextCodec, ValueCodec};
use crate::error::ArchiveError;
use crate::field::Field;
use crate::Format;

/// One codec per format, selectable at runtime by [`Format`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Codecs {
    pub text: TextCodec,
    pub binary: BinaryCodec,
}

impl Codecs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encode<T: Field>(&self, format: Format, value: &mut T) -> Result<Vec<u8>, ArchiveError> {
        match format {
            Format::Text => self.text.encode(value),
            Format::Binary => self.binary.encode(value),
        }
    }

    pub fn decode<T: Field>(&self, format: Format, bytes: &[u8]) -> Result<T, ArchiveError> {
        match format {
            Format::Text => self.text.decode(bytes),
            Format::Binary => self.binary.decode(bytes),
        }
    }
}
