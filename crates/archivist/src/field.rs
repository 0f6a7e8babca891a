//! Dispatch core: maps a field's declared type onto one archive operation.

use crate::archive::Archive;
use crate::error::ArchiveError;
use crate::path::FieldKey;

/// A value that can occupy a field slot.
///
/// The impl picks the archive operation for the type, so `describe` bodies
/// never branch on value kinds. `Default` supplies the blank value an input
/// archive decodes into (sequence elements, optional payloads).
///
/// Aggregates and variants get their impl from `#[derive(Describe)]` /
/// `#[derive(Variant)]` or from [`impl_field!`](crate::impl_field).
pub trait Field: Default {
    fn visit<A: Archive>(ar: &mut A, key: FieldKey, value: &mut Self) -> Result<(), ArchiveError>;
}

macro_rules! impl_field_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Field for $ty {
                #[inline]
                fn visit<A: Archive>(
                    ar: &mut A,
                    key: FieldKey,
                    value: &mut Self,
                ) -> Result<(), ArchiveError> {
                    ar.primitive(key, value)
                }
            }
        )*
    };
}

impl_field_primitive!(bool, u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl Field for String {
    fn visit<A: Archive>(ar: &mut A, key: FieldKey, value: &mut Self) -> Result<(), ArchiveError> {
        ar.string(key, value)
    }
}

impl<T: Field> Field for Vec<T> {
    fn visit<A: Archive>(ar: &mut A, key: FieldKey, value: &mut Self) -> Result<(), ArchiveError> {
        ar.sequence(key, value, |ar, elem| T::visit(ar, FieldKey::ELEMENT, elem))
    }
}

impl<T: Field> Field for Option<T> {
    fn visit<A: Archive>(ar: &mut A, key: FieldKey, value: &mut Self) -> Result<(), ArchiveError> {
        ar.optional(key, value)
    }
}

impl<T: Field> Field for Box<T> {
    fn visit<A: Archive>(ar: &mut A, key: FieldKey, value: &mut Self) -> Result<(), ArchiveError> {
        T::visit(ar, key, value)
    }
}

/// Implements [`Field`] for a hand-written aggregate or variant.
///
/// ```
/// # use archivist::{Archive, ArchiveError, Describe};
/// #[derive(Default)]
/// struct Empty;
///
/// impl Describe for Empty {
///     fn describe<A: Archive>(&mut self, _ar: &mut A) -> Result<(), ArchiveError> {
///         Ok(())
///     }
/// }
/// archivist::impl_field!(Empty => nested);
/// ```
#[macro_export]
macro_rules! impl_field {
    ($ty:ty => nested) => {
        impl $crate::Field for $ty {
            fn visit<A: $crate::Archive>(
                ar: &mut A,
                key: $crate::FieldKey,
                value: &mut Self,
            ) -> ::core::result::Result<(), $crate::ArchiveError> {
                ar.nested(key, value)
            }
        }
    };
    ($ty:ty => variant) => {
        impl $crate::Field for $ty {
            fn visit<A: $crate::Archive>(
                ar: &mut A,
                key: $crate::FieldKey,
                value: &mut Self,
            ) -> ::core::result::Result<(), $crate::ArchiveError> {
                ar.variant(key, value)
            }
        }
    };
}
