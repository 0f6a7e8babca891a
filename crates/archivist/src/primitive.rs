//! The closed set of primitive kinds every backend understands.
//!
//! Backends never inspect Rust types at runtime: a [`Primitive`] announces
//! its [`ScalarKind`] as a constant and converts to and from the matching
//! [`Scalar`] arm, so each backend handles exactly eleven cases.

/// Kind of a primitive slot, known before any value is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl ScalarKind {
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
        }
    }

    /// Encoded width in the binary backend.
    pub fn width(self) -> usize {
        match self {
            ScalarKind::Bool | ScalarKind::U8 | ScalarKind::I8 => 1,
            ScalarKind::U16 | ScalarKind::I16 => 2,
            ScalarKind::U32 | ScalarKind::I32 | ScalarKind::F32 => 4,
            ScalarKind::U64 | ScalarKind::I64 | ScalarKind::F64 => 8,
        }
    }
}

/// A primitive value tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
}

impl Scalar {
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::U8(_) => ScalarKind::U8,
            Scalar::U16(_) => ScalarKind::U16,
            Scalar::U32(_) => ScalarKind::U32,
            Scalar::U64(_) => ScalarKind::U64,
            Scalar::I8(_) => ScalarKind::I8,
            Scalar::I16(_) => ScalarKind::I16,
            Scalar::I32(_) => ScalarKind::I32,
            Scalar::I64(_) => ScalarKind::I64,
            Scalar::F32(_) => ScalarKind::F32,
            Scalar::F64(_) => ScalarKind::F64,
        }
    }
}

/// A fixed-width value that maps onto exactly one [`Scalar`] arm.
pub trait Primitive: Copy + Default + 'static {
    const KIND: ScalarKind;

    fn into_scalar(self) -> Scalar;

    /// Returns `None` if `scalar` is not of kind [`Primitive::KIND`].
    fn from_scalar(scalar: Scalar) -> Option<Self>;
}

macro_rules! impl_primitive {
    ($($ty:ty => $arm:ident),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const KIND: ScalarKind = ScalarKind::$arm;

                #[inline]
                fn into_scalar(self) -> Scalar {
                    Scalar::$arm(self)
                }

                #[inline]
                fn from_scalar(scalar: Scalar) -> Option<Self> {
                    match scalar {
                        Scalar::$arm(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_primitive! {
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
}
