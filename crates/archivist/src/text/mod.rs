//! Self-describing text backend (JSON).
//!
//! Fields are addressed by name: decoding is independent of key order but
//! depends on keys being stable between producer and consumer.
//!
//! | value kind | JSON shape |
//! |------------|------------|
//! | primitive  | number / `true` / `false` |
//! | string     | string |
//! | optional   | payload, or key omitted (`null` in arrays and at the root) |
//! | sequence   | array |
//! | variant    | `{"tag": n, "value": payload}` |
//! | aggregate  | object |
//!
//! An optional nested directly in an optional (`Option<Option<T>>`) has no
//! distinct JSON form for `Some(None)`; it reads back as `None`.

mod convert;
mod options;
mod reader;
mod writer;

pub use options::TextOptions;
pub use reader::TextReader;
pub use writer::TextWriter;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{ArchiveError, ErrorKind};
use crate::field::Field;
use crate::path::FieldPath;

/// Encodes `value` into a JSON tree. `value` is only read.
pub fn to_value<T: Field>(value: &mut T) -> Result<Value, ArchiveError> {
    to_value_with(value, &TextOptions::default())
}

pub fn to_value_with<T: Field>(
    value: &mut T,
    options: &TextOptions,
) -> Result<Value, ArchiveError> {
    TextWriter::with_options(*options).encode(value)
}

/// Encodes `value` as compact JSON text. `value` is only read.
pub fn to_string<T: Field>(value: &mut T) -> Result<String, ArchiveError> {
    to_string_with(value, &TextOptions::default())
}

pub fn to_string_with<T: Field>(
    value: &mut T,
    options: &TextOptions,
) -> Result<String, ArchiveError> {
    let json = to_value_with(value, options)?;
    let text = if options.pretty {
        serde_json::to_string_pretty(&json)
    } else {
        serde_json::to_string(&json)
    }
    .map_err(|e| {
        ArchiveError::new(ErrorKind::Unrepresentable(e.to_string()), FieldPath::root())
    })?;
    trace!(target: "archivist::text", len = text.len(), "encoded");
    Ok(text)
}

/// Decodes a `T` from a JSON tree.
pub fn from_value<T: Field>(json: &Value) -> Result<T, ArchiveError> {
    from_value_with(json, &TextOptions::default())
}

pub fn from_value_with<T: Field>(json: &Value, options: &TextOptions) -> Result<T, ArchiveError> {
    TextReader::with_options(json, *options)
        .decode()
        .inspect_err(|err| {
            debug!(
                target: "archivist::text",
                path = %err.path(),
                error = %err.kind(),
                "decode failed"
            );
        })
}

/// Parses JSON text and decodes a `T` from it.
pub fn from_str<T: Field>(text: &str) -> Result<T, ArchiveError> {
    from_str_with(text, &TextOptions::default())
}

pub fn from_str_with<T: Field>(text: &str, options: &TextOptions) -> Result<T, ArchiveError> {
    let json: Value = serde_json::from_str(text).map_err(|e| {
        debug!(target: "archivist::text", error = %e, "invalid JSON");
        ArchiveError::new(ErrorKind::MalformedInput(e.to_string()), FieldPath::root())
    })?;
    from_value_with(&json, options)
}
