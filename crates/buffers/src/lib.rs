//! Binary buffer utilities for archivist.
//!
//! This crate provides the byte-level plumbing used by the positional binary
//! backend: an auto-growing [`Writer`] and a bounds-checked [`Reader`]. All
//! multi-byte values use big-endian (network) byte order.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking
//! - [`Writer`] - Writes binary data to an auto-growing buffer
//!
//! # Example
//!
//! ```
//! use archivist_buffers::{Reader, Writer};
//!
//! // Write some data
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! writer.utf8("hello");
//! let data = writer.flush();
//!
//! // Read it back
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8(), Ok(0x01));
//! assert_eq!(reader.u16(), Ok(0x0203));
//! assert_eq!(reader.utf8(5), Ok("hello"));
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer {
        /// Bytes the read required.
        needed: usize,
        /// Bytes that were left when the read was attempted.
        remaining: usize,
    },
    /// Invalid UTF-8 sequence.
    InvalidUtf8,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer { needed, remaining } => write!(
                f,
                "end of buffer: needed {needed} bytes, {remaining} remaining"
            ),
            BufferError::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
        }
    }
}

impl std::error::Error for BufferError {}
