//! Input archive consuming positional encodings from a byte slice.

use archivist_buffers::{BufferError, Reader};

use super::BinaryOptions;
use crate::archive::{Archive, Direction};
use crate::describe::Describe;
use crate::error::{ArchiveError, ErrorKind};
use crate::field::Field;
use crate::path::{FieldKey, KeyPath};
use crate::primitive::{Primitive, Scalar, ScalarKind};
use crate::variant::{self, Variant};

impl From<BufferError> for ErrorKind {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer { needed, remaining } => {
                ErrorKind::TruncatedInput { needed, remaining }
            }
            BufferError::InvalidUtf8 => ErrorKind::MalformedInput("invalid UTF-8".to_owned()),
        }
    }
}

/// Decodes a value from the compact binary form.
///
/// Reads must happen in exactly the order the writer produced them; the
/// format carries no keys to detect reordering.
pub struct BinaryReader<'a> {
    reader: Reader<'a>,
    options: BinaryOptions,
    path: KeyPath,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_options(data, BinaryOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: BinaryOptions) -> Self {
        Self {
            reader: Reader::new(data),
            options,
            path: KeyPath::new(),
        }
    }

    /// Reads the root as a `T` and requires the input to end there.
    pub fn decode<T: Field>(mut self) -> Result<T, ArchiveError> {
        let mut value = T::default();
        T::visit(&mut self, FieldKey::ELEMENT, &mut value)?;
        self.finish()?;
        Ok(value)
    }

    /// Fails if any input is left unread.
    pub fn finish(self) -> Result<(), ArchiveError> {
        let left = self.reader.size();
        if left > 0 {
            return Err(self.path.error(ErrorKind::MalformedInput(format!(
                "{left} trailing bytes"
            ))));
        }
        Ok(())
    }

    fn fail(&self, key: FieldKey, kind: impl Into<ErrorKind>) -> ArchiveError {
        self.path.error_at(key, kind.into())
    }

    fn read_len(&mut self, key: FieldKey) -> Result<usize, ArchiveError> {
        let len = self.reader.u32().map_err(|e| self.fail(key, e))?;
        if len > self.options.max_len {
            return Err(self.fail(
                key,
                ErrorKind::MalformedInput(format!(
                    "length {len} exceeds limit {}",
                    self.options.max_len
                )),
            ));
        }
        Ok(len as usize)
    }

    fn read_scalar(&mut self, kind: ScalarKind) -> Result<Scalar, ErrorKind> {
        let r = &mut self.reader;
        let scalar = match kind {
            ScalarKind::Bool => match r.u8()? {
                0 => Scalar::Bool(false),
                1 => Scalar::Bool(true),
                b => return Err(ErrorKind::MalformedInput(format!("invalid bool byte {b}"))),
            },
            ScalarKind::U8 => Scalar::U8(r.u8()?),
            ScalarKind::U16 => Scalar::U16(r.u16()?),
            ScalarKind::U32 => Scalar::U32(r.u32()?),
            ScalarKind::U64 => Scalar::U64(r.u64()?),
            ScalarKind::I8 => Scalar::I8(r.i8()?),
            ScalarKind::I16 => Scalar::I16(r.i16()?),
            ScalarKind::I32 => Scalar::I32(r.i32()?),
            ScalarKind::I64 => Scalar::I64(r.i64()?),
            ScalarKind::F32 => Scalar::F32(r.f32()?),
            ScalarKind::F64 => Scalar::F64(r.f64()?),
        };
        Ok(scalar)
    }
}

impl Archive for BinaryReader<'_> {
    fn direction(&self) -> Direction {
        Direction::Input
    }

    fn primitive<P: Primitive>(
        &mut self,
        key: FieldKey,
        value: &mut P,
    ) -> Result<(), ArchiveError> {
        let scalar = self
            .read_scalar(P::KIND)
            .map_err(|kind| self.fail(key, kind))?;
        // `read_scalar` yields the arm `P::KIND` names.
        if let Some(v) = P::from_scalar(scalar) {
            *value = v;
        }
        Ok(())
    }

    fn string(&mut self, key: FieldKey, value: &mut String) -> Result<(), ArchiveError> {
        let len = self.read_len(key)?;
        let s = self.reader.utf8(len).map_err(|e| self.fail(key, e))?;
        value.clear();
        value.push_str(s);
        Ok(())
    }

    fn optional<T: Field>(
        &mut self,
        key: FieldKey,
        value: &mut Option<T>,
    ) -> Result<(), ArchiveError> {
        match self.reader.u8().map_err(|e| self.fail(key, e))? {
            0 => {
                *value = None;
                Ok(())
            }
            1 => {
                let mut inner = T::default();
                T::visit(self, key, &mut inner)?;
                *value = Some(inner);
                Ok(())
            }
            b => Err(self.fail(
                key,
                ErrorKind::MalformedInput(format!("invalid presence flag {b}")),
            )),
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
        self.path.descend(key, self.options.max_depth)?;
        let count = self.read_len(key)?;
        let entered = self.path.enter(key);
        value.clear();
        // A hostile count must not drive the allocation.
        value.reserve(count.min(self.reader.size()));
        for i in 0..count {
            self.path.enter_index(i);
            let mut elem = T::default();
            visit(self, &mut elem)?;
            value.push(elem);
            self.path.leave_index();
        }
        self.path.leave(entered);
        self.path.ascend();
        Ok(())
    }

    fn variant<V: Variant>(&mut self, key: FieldKey, value: &mut V) -> Result<(), ArchiveError> {
        self.path.descend(key, self.options.max_depth)?;
        let tag = variant::read_tag(&mut self.reader, V::TAG_WIDTH)
            .map_err(|e| self.fail(key, e))?;
        let mut decoded: V = variant::resolve(tag).map_err(|kind| self.fail(key, kind))?;
        let entered = self.path.enter(key);
        decoded.describe_payload(self)?;
        self.path.leave(entered);
        self.path.ascend();
        *value = decoded;
        Ok(())
    }

    fn nested<T: Describe>(&mut self, key: FieldKey, value: &mut T) -> Result<(), ArchiveError> {
        self.path.descend(key, self.options.max_depth)?;
        let entered = self.path.enter(key);
        value.describe(self)?;
        self.path.leave(entered);
        self.path.ascend();
        Ok(())
    }
}
