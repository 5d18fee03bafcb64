//! Error types for chain planning and evaluation.

use thiserror::Error;

/// Errors raised while building, planning or evaluating a matrix chain.
///
/// Only [`ChainError::DimensionMismatch`] can come out of the core multiply and
/// evaluation path; the remaining variants reject malformed input before the
/// planner or evaluator runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    /// Inner dimensions of two operands disagree.
    #[error("dimension mismatch: cannot multiply {}x{} by {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Dimension vector describes no matrices (fewer than two entries).
    #[error("dimension vector must describe at least one matrix")]
    EmptyChain,

    /// A dimension vector entry is zero.
    #[error("dimension p[{index}] must be positive")]
    ZeroDimension { index: usize },

    /// Matrix built from no rows or from empty rows.
    #[error("matrix must have at least one row and one column")]
    EmptyMatrix,

    /// Matrix rows of differing lengths.
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Flat buffer length differs from `rows * cols`.
    #[error("buffer holds {actual} elements, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    /// `rows * cols` does not fit in `usize`.
    #[error("matrix shape {rows}x{cols} is too large")]
    ShapeOverflow { rows: usize, cols: usize },

    /// Number of supplied matrices differs from the planned chain length.
    #[error("expected {expected} matrices, got {actual}")]
    MatrixCount { expected: usize, actual: usize },

    /// A supplied matrix does not match its declared `p[i] x p[i+1]` shape.
    #[error("matrix {index} is {}x{}, expected {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    ShapeMismatch {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::ChainError;

    #[test]
    fn mismatch_message_names_both_shapes() {
        let err = ChainError::DimensionMismatch {
            left: (2, 3),
            right: (4, 5),
        };
        assert_eq!(err.to_string(), "dimension mismatch: cannot multiply 2x3 by 4x5");
    }

    #[test]
    fn shape_message_names_index() {
        let err = ChainError::ShapeMismatch {
            index: 1,
            expected: (3, 4),
            actual: (3, 5),
        };
        assert_eq!(err.to_string(), "matrix 1 is 3x5, expected 3x4");
    }

    #[test]
    fn buffer_message_names_lengths() {
        let err = ChainError::BufferLength {
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "buffer holds 3 elements, expected 4");
    }
}
