//! Compact positional binary backend.
//!
//! The encoding of a value is the concatenation of its fields' encodings in
//! description order. All integers are big-endian.
//!
//! | value kind | bytes |
//! |------------|-------|
//! | `bool`     | `0x00` / `0x01` |
//! | integers, floats | fixed width, big-endian |
//! | string     | `{len: u32}{utf8}` |
//! | sequence   | `{count: u32}{element}*count` |
//! | optional   | `{flag: u8}{payload}?` |
//! | variant    | `{tag: u8 \| u16}{payload}` |
//! | aggregate  | fields back to back |
//!
//! ```
//! let mut position = vec![10.0f32, 20.0, 30.0];
//! let bytes = archivist::binary::to_bytes(&mut position).unwrap();
//! assert_eq!(&bytes[..4], &[0, 0, 0, 3]);
//! assert_eq!(bytes.len(), 4 + 3 * 4);
//! ```

mod options;
mod reader;
mod writer;

pub use options::{BinaryOptions, DEFAULT_MAX_LEN};
pub use reader::BinaryReader;
pub use writer::BinaryWriter;

use tracing::{debug, trace};

use crate::error::ArchiveError;
use crate::field::Field;

/// Encodes `value` into bytes. `value` is only read.
pub fn to_bytes<T: Field>(value: &mut T) -> Result<Vec<u8>, ArchiveError> {
    to_bytes_with(value, &BinaryOptions::default())
}

pub fn to_bytes_with<T: Field>(
    value: &mut T,
    options: &BinaryOptions,
) -> Result<Vec<u8>, ArchiveError> {
    let bytes = BinaryWriter::with_options(*options).encode(value)?;
    trace!(target: "archivist::binary", len = bytes.len(), "encoded");
    Ok(bytes)
}

/// Decodes a `T` that must span all of `bytes`.
pub fn from_bytes<T: Field>(bytes: &[u8]) -> Result<T, ArchiveError> {
    from_bytes_with(bytes, &BinaryOptions::default())
}

pub fn from_bytes_with<T: Field>(bytes: &[u8], options: &BinaryOptions) -> Result<T, ArchiveError> {
    BinaryReader::with_options(bytes, *options)
        .decode()
        .inspect_err(|err| {
            debug!(
                target: "archivist::binary",
                path = %err.path(),
                error = %err.kind(),
                "decode failed"
            );
        })
}
