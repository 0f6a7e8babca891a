//! Binary buffer reader with cursor tracking.

use std::str;

use crate::BufferError;

/// A binary buffer reader that reads data from a byte slice.
///
/// The reader maintains a cursor position. Every read is bounds-checked: a
/// read that would cross the end of the slice fails with
/// [`BufferError::EndOfBuffer`] and leaves the cursor where it was.
///
/// # Example
///
/// ```
/// use archivist_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8(), Ok(0x01));
/// assert_eq!(reader.u16(), Ok(0x0203));
/// assert!(reader.u16().is_err());
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

macro_rules! read_be {
    ($(#[$doc:meta] $name:ident => $ty:ty),* $(,)?) => {
        $(
            #[$doc]
            #[inline]
            pub fn $name(&mut self) -> Result<$ty, BufferError> {
                const N: usize = std::mem::size_of::<$ty>();
                let bytes = self.take(N)?;
                let mut arr = [0u8; N];
                arr.copy_from_slice(bytes);
                Ok(<$ty>::from_be_bytes(arr))
            }
        )*
    };
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    /// Returns `true` once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn take(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        let remaining = self.size();
        if size > remaining {
            return Err(BufferError::EndOfBuffer {
                needed: size,
                remaining,
            });
        }
        let start = self.x;
        self.x += size;
        Ok(&self.uint8[start..self.x])
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        Ok(self.take(1)?[0])
    }

    /// Reads a signed 8-bit integer.
    #[inline]
    pub fn i8(&mut self) -> Result<i8, BufferError> {
        Ok(self.take(1)?[0] as i8)
    }

    read_be! {
        /// Reads an unsigned 16-bit integer (big-endian).
        u16 => u16,
        /// Reads a signed 16-bit integer (big-endian).
        i16 => i16,
        /// Reads an unsigned 32-bit integer (big-endian).
        u32 => u32,
        /// Reads a signed 32-bit integer (big-endian).
        i32 => i32,
        /// Reads an unsigned 64-bit integer (big-endian).
        u64 => u64,
        /// Reads a signed 64-bit integer (big-endian).
        i64 => i64,
        /// Reads a 32-bit floating point number (big-endian).
        f32 => f32,
        /// Reads a 64-bit floating point number (big-endian).
        f64 => f64,
    }

    /// Reads a UTF-8 string of the given size.
    ///
    /// The cursor advances past the bytes even when they are not valid UTF-8.
    pub fn utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        let bytes = self.take(size)?;
        str::from_utf8(bytes).map_err(|_| BufferError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8(), Ok(0x01));
        assert_eq!(reader.u8(), Ok(0x02));
        assert_eq!(reader.u8(), Ok(0x03));
        assert!(reader.is_empty());
    }

    #[test]
    fn test_u16() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u16(), Ok(0x0102));
        assert_eq!(reader.u16(), Ok(0x0304));
    }

    #[test]
    fn test_u32() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u32(), Ok(0x01020304));
    }

    #[test]
    fn test_short_read_keeps_cursor() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8(), Ok(0x01));
        assert_eq!(
            reader.u32(),
            Err(BufferError::EndOfBuffer {
                needed: 4,
                remaining: 2
            })
        );
        assert_eq!(reader.x, 1);
        assert_eq!(reader.u16(), Ok(0x0203));
    }

    #[test]
    fn test_utf8() {
        let data = b"hello world";
        let mut reader = Reader::new(data);
        assert_eq!(reader.utf8(5), Ok("hello"));
        assert_eq!(reader.utf8(6), Ok(" world"));
    }

    #[test]
    fn test_invalid_utf8() {
        let data = [0xff, 0xfe];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.utf8(2), Err(BufferError::InvalidUtf8));
    }
}
