//! Uniform bytes-in/bytes-out codecs, one per wire format.

mod binary;
mod registry;
mod text;
mod types;

pub use binary::BinaryCodec;
pub use registry::Codecs;
pub use text::TextCodec;
pub use types::ValueCodec;

pub use crate::constants::Format;
