use thiserror::Error;

/// Errors raised by invalid algebraic operations.
///
/// These are programmer or data errors (bad indices, singular matrices,
/// point + point). They abort the current operation instead of producing
/// garbage geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("tuple index {0} out of range 0..=3")]
    IndexOutOfRange(usize),

    #[error("operation would produce w = {0}, outside [0, 1]")]
    InvalidW(f64),

    #[error("cannot {0} a point")]
    PointOperation(&'static str),

    #[error("matrix initializer has {actual} values, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("coordinate ({row}, {col}) out of range for {rows}x{cols} matrix")]
    CoordinateOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("{rows}x{cols} matrix is not square")]
    NotSquare { rows: usize, cols: usize },

    #[error("transform requires a 4x4 matrix, got {rows}x{cols}")]
    NotTransform { rows: usize, cols: usize },

    #[error("matrix is singular and cannot be inverted")]
    Singular,
}

pub type MathResult<T> = Result<T, MathError>;
