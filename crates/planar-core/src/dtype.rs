use std::fmt;

// DType: numeric element types a tensor can hold
//
// Tensors are generic over their element type, so the DType is never needed
// to dispatch an operation. It exists as a runtime tag for diagnostics and
// for callers that size buffers or serialize weights:
//
//   F16 / BF16: half precision weights
//   F32       : the default activation type
//   F64       : high-precision reference computations
//   U8        : image data, masks
//   U32 / I32 : indices, quantized accumulators
//   I64       : labels

/// Runtime tag of a tensor's element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    F16,
    BF16,
    F32,
    F64,
    U8,
    U32,
    I32,
    I64,
}

impl DType {
    /// Size of one element in bytes.
    pub fn size_in_bytes(&self) -> usize {
        match self {
            DType::F16 | DType::BF16 => 2,
            DType::F32 | DType::U32 | DType::I32 => 4,
            DType::F64 | DType::I64 => 8,
            DType::U8 => 1,
        }
    }

    /// Whether this dtype is a floating-point type.
    pub fn is_float(&self) -> bool {
        matches!(self, DType::F16 | DType::BF16 | DType::F32 | DType::F64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DType::F16 => "f16",
            DType::BF16 => "bf16",
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::U8 => "u8",
            DType::U32 => "u32",
            DType::I32 => "i32",
            DType::I64 => "i64",
        };
        write!(f, "{}", s)
    }
}

// WithDType: the element contract of Tensor<T>
//
// Any Rust numeric type implementing this trait can be stored in a tensor.
// Beyond the DType tag it provides lossy f64 conversions, which is how
// random normal samples (always drawn as f64) reach integer and half types.

/// Trait implemented by Rust types that can be stored in a tensor.
pub trait WithDType:
    Copy
    + Default
    + PartialEq
    + Send
    + Sync
    + 'static
    + num_traits::NumCast
    + fmt::Debug
    + fmt::Display
{
    /// The corresponding DType enum variant.
    const DTYPE: DType;

    /// Convert this value to f64.
    fn to_f64(self) -> f64;

    /// Create a value of this type from f64 (saturating/truncating for ints).
    fn from_f64(v: f64) -> Self;

    /// The zero value.
    fn zero() -> Self {
        Self::from_f64(0.0)
    }
}

macro_rules! with_dtype_primitive {
    ($ty:ty, $dtype:ident) => {
        impl WithDType for $ty {
            const DTYPE: DType = DType::$dtype;
            fn to_f64(self) -> f64 {
                self as f64
            }
            fn from_f64(v: f64) -> Self {
                v as $ty
            }
        }
    };
}

with_dtype_primitive!(f32, F32);
with_dtype_primitive!(f64, F64);
with_dtype_primitive!(u8, U8);
with_dtype_primitive!(u32, U32);
with_dtype_primitive!(i32, I32);
with_dtype_primitive!(i64, I64);

impl WithDType for half::f16 {
    const DTYPE: DType = DType::F16;
    fn to_f64(self) -> f64 {
        self.to_f32() as f64
    }
    fn from_f64(v: f64) -> Self {
        half::f16::from_f64(v)
    }
}

impl WithDType for half::bf16 {
    const DTYPE: DType = DType::BF16;
    fn to_f64(self) -> f64 {
        self.to_f32() as f64
    }
    fn from_f64(v: f64) -> Self {
        half::bf16::from_f64(v)
    }
}
