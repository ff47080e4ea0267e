use thiserror::Error;

pub type Result<T> = core::result::Result<T, LinsysError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinsysError {
    #[error("Invalid matrix dimensions: {0}")]
    InvalidDimensions(String),

    #[error("Matrix must be square (dims: {rows}x{cols})")]
    NotSquareMatrix { rows: usize, cols: usize },

    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Non-finite entry at ({row}, {col})")]
    NonFiniteEntry { row: usize, col: usize },

    #[error("Matrix is not symmetric: entries ({row}, {col}) and ({col}, {row}) differ")]
    NotSymmetric { row: usize, col: usize },

    #[error("Matrix is not positive definite: pivot {pivot} at column {column} is not positive")]
    NotPositiveDefinite { column: usize, pivot: f64 },

    #[error("Zero pivot at U[{index}][{index}] during LU factorization")]
    ZeroPivot { index: usize },

    #[error("Triangular matrix is singular: zero diagonal entry at index {index}")]
    SingularTriangular { index: usize },

    /// An intermediate or final value overflowed to a non-finite number even
    /// though every input entry was finite.
    #[error("Numerical overflow: non-finite value produced at index {index}")]
    Overflow { index: usize },

    /// The classifier reported a symmetric positive definite matrix but the
    /// Cholesky factorization rejected it. Never a property of the input.
    #[error(
        "Internal error: matrix classified as positive definite but Cholesky failed \
         at column {column} (pivot {pivot})"
    )]
    InconsistentClassification { column: usize, pivot: f64 },
}
