/// All errors that can occur within planar.
///
/// Every variant is a precondition violation detected before the offending
/// operation touches the tensor, so a returned error never leaves a tensor
/// half-mutated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Shape vector with a length outside 1..=3, or containing a zero entry.
    #[error("invalid shape {dims:?}: expected 1 to 3 positive dimensions")]
    Shape { dims: Vec<usize> },

    /// Element count of the input does not match the tensor size.
    #[error("{op}: size mismatch, expected {expected} elements, got {got}")]
    SizeMismatch {
        op: &'static str,
        expected: usize,
        got: usize,
    },

    /// Channel, row, column or flat offset outside the valid range.
    #[error("{axis} index {index} out of bounds (size {bound})")]
    OutOfBounds {
        axis: &'static str,
        index: usize,
        bound: usize,
    },

    /// Size-dependent operation invoked on a tensor holding no elements.
    #[error("{op}: tensor is empty")]
    EmptyTensor { op: &'static str },

    /// Generic message for cases not covered above.
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an error from any string message.
    pub fn msg(s: impl Into<String>) -> Self {
        Error::Msg(s.into())
    }

    pub(crate) fn out_of_bounds(axis: &'static str, index: usize, bound: usize) -> Self {
        Error::OutOfBounds { axis, index, bound }
    }
}

/// Convenience Result type used throughout planar.
pub type Result<T> = std::result::Result<T, Error>;

/// Early return with a formatted error message.
/// Usage: `bail!("pads must have 4 entries, got {}", n)`
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::Msg(format!($($arg)*)))
    };
}
