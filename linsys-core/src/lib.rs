//! # Linear System Core Library
//!
//! Provides the dense matrix types, triangular matrices, CPU matrix/vector
//! operations and the error taxonomy shared by the `linsys` solvers.

// Declare modules
pub mod dense_matrix;
pub mod error;
pub mod ops;
pub mod traits;
pub mod triangular;

// Re-export public types
pub use dense_matrix::DenseMatrix;
pub use error::{LinsysError, Result};
pub use traits::{Matrix, Scalar};
pub use triangular::{Lower, LowerTriangular, Side, Triangular, Upper, UpperTriangular};
