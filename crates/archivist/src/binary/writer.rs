//! Output archive appending positional encodings to a byte buffer.

use archivist_buffers::Writer;

use super::BinaryOptions;
use crate::archive::{Archive, Direction};
use crate::describe::Describe;
use crate::error::{ArchiveError, ErrorKind};
use crate::field::Field;
use crate::path::{FieldKey, KeyPath};
use crate::primitive::{Primitive, Scalar};
use crate::variant::{self, Variant};

/// Encodes a value into the compact binary form.
///
/// Keys are not written; every field lands at the position its describe
/// call gives it.
pub struct BinaryWriter {
    writer: Writer,
    options: BinaryOptions,
    path: KeyPath,
}

impl Default for BinaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::with_options(BinaryOptions::default())
    }

    pub fn with_options(options: BinaryOptions) -> Self {
        Self {
            writer: Writer::new(),
            options,
            path: KeyPath::new(),
        }
    }

    /// Writes `value` as the root and returns the encoded bytes.
    pub fn encode<T: Field>(mut self, value: &mut T) -> Result<Vec<u8>, ArchiveError> {
        T::visit(&mut self, FieldKey::ELEMENT, value)?;
        Ok(self.finish())
    }

    /// Consumes the writer, returning the bytes written so far.
    pub fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }

    fn write_len(&mut self, key: FieldKey, len: usize, what: &str) -> Result<(), ArchiveError> {
        match u32::try_from(len) {
            Ok(n) if n <= self.options.max_len => {
                self.writer.u32(n);
                Ok(())
            }
            _ => Err(self.path.error_at(
                key,
                ErrorKind::Unrepresentable(format!(
                    "{what} length {len} exceeds limit {}",
                    self.options.max_len
                )),
            )),
        }
    }

    fn write_scalar(&mut self, scalar: Scalar) {
        let w = &mut self.writer;
        match scalar {
            Scalar::Bool(b) => w.u8(u8::from(b)),
            Scalar::U8(n) => w.u8(n),
            Scalar::U16(n) => w.u16(n),
            Scalar::U32(n) => w.u32(n),
            Scalar::U64(n) => w.u64(n),
            Scalar::I8(n) => w.i8(n),
            Scalar::I16(n) => w.i16(n),
            Scalar::I32(n) => w.i32(n),
            Scalar::I64(n) => w.i64(n),
            Scalar::F32(f) => w.f32(f),
            Scalar::F64(f) => w.f64(f),
        }
    }
}

impl Archive for BinaryWriter {
    fn direction(&self) -> Direction {
        Direction::Output
    }

    fn primitive<P: Primitive>(
        &mut self,
        _key: FieldKey,
        value: &mut P,
    ) -> Result<(), ArchiveError> {
        self.write_scalar(value.into_scalar());
        Ok(())
    }

    fn string(&mut self, key: FieldKey, value: &mut String) -> Result<(), ArchiveError> {
        self.write_len(key, value.len(), "string")?;
        self.writer.utf8(value);
        Ok(())
    }

    fn optional<T: Field>(
        &mut self,
        key: FieldKey,
        value: &mut Option<T>,
    ) -> Result<(), ArchiveError> {
        match value {
            Some(inner) => {
                self.writer.u8(1);
                T::visit(self, key, inner)
            }
            None => {
                self.writer.u8(0);
                Ok(())
            }
        }
    }

    fn sequence<T, F>(
        &mut self,
        key: FieldKey,
        value: &mut Vec<T>,
        mut visit: F,
    ) -> Result<(), ArchiveError>
    where
        T: Default,
        F: FnMut(&mut Self, &mut T) -> Result<(), ArchiveError>,
    {
        self.write_len(key, value.len(), "sequence")?;
        let entered = self.path.enter(key);
        for (i, elem) in value.iter_mut().enumerate() {
            self.path.enter_index(i);
            visit(self, elem)?;
            self.path.leave_index();
        }
        self.path.leave(entered);
        Ok(())
    }

    fn variant<V: Variant>(&mut self, key: FieldKey, value: &mut V) -> Result<(), ArchiveError> {
        let tag = variant::checked_tag(value).map_err(|kind| self.path.error_at(key, kind))?;
        variant::write_tag(&mut self.writer, V::TAG_WIDTH, tag);
        let entered = self.path.enter(key);
        value.describe_payload(self)?;
        self.path.leave(entered);
        Ok(())
    }

    fn nested<T: Describe>(&mut self, key: FieldKey, value: &mut T) -> Result<(), ArchiveError> {
        let entered = self.path.enter(key);
        value.describe(self)?;
        self.path.leave(entered);
        Ok(())
    }
}
