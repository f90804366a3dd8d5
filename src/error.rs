use core::fmt;

/// Precondition failures raised by the engine.
///
/// Everything else (out-of-bounds seeds, empty seed sets) is handled by
/// clamping or by degenerate-but-valid results and never surfaces here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefineError {
    /// The image rectangle has a zero dimension.
    EmptyBounds { width: usize, height: usize },
    /// Two fields that must share the pixel grid do not.
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

impl fmt::Display for RefineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBounds { width, height } => {
                write!(f, "image bounds must be positive, got {width}x{height}")
            }
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "field dimension mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
        }
    }
}

impl std::error::Error for RefineError {}
