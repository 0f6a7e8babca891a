//! Positional binary codec wrapper.

use super::types::ValueCodec;
use crate::binary::{self, BinaryOptions};
use crate::error::ArchiveError;
use crate::field::Field;
use crate::Format;

#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec {
    pub options: BinaryOptions,
}

impl BinaryCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BinaryOptions) -> Self {
        Self { options }
    }
}

impl ValueCodec for BinaryCodec {
    fn id(&self) -> &'static str {
        Format::Binary.id()
    }

    fn format(&self) -> Format {
        Format::Binary
    }

    fn encode<T: Field>(&self, value: &mut T) -> Result<Vec<u8>, ArchiveError> {
        binary::to_bytes_with(value, &self.options)
    }

    fn decode<T: Field>(&self, bytes: &[u8]) -> Result<T, ArchiveError> {
        binary::from_bytes_with(bytes, &self.options)
    }
}
