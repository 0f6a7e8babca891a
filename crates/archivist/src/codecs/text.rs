//! JSON codec wrapper.

use super::types::ValueCodec;
use crate::error::{ArchiveError, ErrorKind};
use crate::field::Field;
use crate::path::FieldPath;
use crate::text::{self, TextOptions};
use crate::Format;

#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec {
    pub options: TextOptions,
}

impl TextCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TextOptions) -> Self {
        Self { options }
    }
}

impl ValueCodec for TextCodec {
    fn id(&self) -> &'static str {
        Format::Text.id()
    }

    fn format(&self) -> Format {
        Format::Text
    }

    fn encode<T: Field>(&self, value: &mut T) -> Result<Vec<u8>, ArchiveError> {
        text::to_string_with(value, &self.options).map(String::into_bytes)
    }

    fn decode<T: Field>(&self, bytes: &[u8]) -> Result<T, ArchiveError> {
        let s = std::str::from_utf8(bytes).map_err(|e| {
            ArchiveError::new(ErrorKind::MalformedInput(e.to_string()), FieldPath::root())
        })?;
        text::from_str_with(s, &self.options)
    }
}
