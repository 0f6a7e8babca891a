//! Format-agnostic archive serialization.
//!
//! A type describes its fields once, through [`Describe`], to an abstract
//! [`Archive`]. The same description then drives encoding and decoding for
//! every backend:
//!
//! - [`text`]: self-describing JSON, fields addressed by key;
//! - [`binary`]: compact positional bytes, fields addressed by order.
//!
//! Field types pick their archive operation through [`Field`]; tagged unions
//! implement [`Variant`] with explicit, stable discriminants.
//!
//! ```
//! use archivist::{Describe, Variant};
//!
//! #[derive(Debug, Default, PartialEq, Variant)]
//! enum Shape {
//!     #[default]
//!     #[archive(tag = 0)]
//!     Empty,
//!     #[archive(tag = 1)]
//!     Circle(f64),
//! }
//!
//! #[derive(Debug, Default, PartialEq, Describe)]
//! struct Scene {
//!     name: String,
//!     shapes: Vec<Shape>,
//!     #[archive(rename = "z")]
//!     depth: Option<u8>,
//! }
//!
//! let mut scene = Scene {
//!     name: "demo".into(),
//!     shapes: vec![Shape::Circle(1.5), Shape::Empty],
//!     depth: None,
//! };
//! let text = archivist::text::to_string(&mut scene).unwrap();
//! assert_eq!(
//!     text,
//!     r#"{"name":"demo","shapes":[{"tag":1,"value":1.5},{"tag":0}]}"#
//! );
//! assert_eq!(archivist::text::from_str::<Scene>(&text).unwrap(), scene);
//!
//! let bytes = archivist::binary::to_bytes(&mut scene).unwrap();
//! assert_eq!(archivist::binary::from_bytes::<Scene>(&bytes).unwrap(), scene);
//! ```

extern crate self as archivist;

pub mod archive;
pub mod binary;
pub mod codecs;
mod constants;
pub mod describe;
pub mod error;
pub mod field;
pub mod path;
pub mod primitive;
pub mod text;
pub mod variant;

pub use archive::{Archive, Direction};
pub use constants::{Format, DEFAULT_MAX_DEPTH};
pub use describe::Describe;
pub use error::{ArchiveError, ErrorKind};
pub use field::Field;
pub use path::{FieldKey, FieldPath, PathSegment};
pub use primitive::{Primitive, Scalar, ScalarKind};
pub use variant::{Tag, TagWidth, Variant};

#[cfg(feature = "derive")]
pub use archivist_derive::{Describe, Variant};
