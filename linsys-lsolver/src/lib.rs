//! `linsys-lsolver`: Direct dense linear equation solvers.
//!
//! This library solves systems of linear equations of the form Ax = b. The
//! [`LinearSystemSolver`] classifies A and uses a Cholesky factorization for
//! symmetric positive definite matrices and a Doolittle LU factorization
//! (no pivoting) for everything else. The individual algorithms are also
//! available on their own under [`algorithms`].

// Core modules
pub mod algorithms;
pub mod config;
pub mod linear_system;

pub use algorithms::{DirectSolveMetadata, SolveAlgorithm, SolveMethod, SolveResult};
pub use config::{GeneralMethod, SolverConfig};
pub use linear_system::{Factorization, LinearSystemSolver};

// Re-export from linsys_core
pub use linsys_core::{DenseMatrix, LinsysError, LowerTriangular, Matrix, Scalar, UpperTriangular};

/// Solves `a x = b` with the default [`LinearSystemSolver`] and returns `x`.
pub fn solve<T: Scalar>(a: &DenseMatrix<T>, b: &[T]) -> Result<Vec<T>, LinsysError> {
    LinearSystemSolver::default().solve(a, b).map(|result| result.x)
}
