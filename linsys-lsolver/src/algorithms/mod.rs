use linsys_core::{LinsysError, Matrix};
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone)]
pub struct SolveResult<V, M> {
    pub x: Vec<V>,   // Solution vector
    pub metadata: M, // Metadata about the solve process
}

// --- Algorithm Trait Definition ---
/// Trait representing a specific direct linear system solving algorithm.
/// Generic over the Matrix type it supports; the element type follows the matrix.
pub trait SolveAlgorithm<M: Matrix> {
    type Metadata: fmt::Debug;

    /// Solves the linear system Ax = b for x.
    ///
    /// # Arguments
    ///
    /// * `a` - The coefficient matrix A. Never modified.
    /// * `b` - The right-hand side vector b.
    ///
    /// # Returns
    ///
    /// A `Result` containing the solution vector x or a `LinsysError`.
    fn solve(
        &self,
        a: &M,
        b: &[M::Value],
    ) -> Result<SolveResult<M::Value, Self::Metadata>, LinsysError>;

    /// Eager input checks, run before any arithmetic.
    fn validate_inputs(&self, a: &M, b: &[M::Value]) -> Result<(), LinsysError> {
        let (rows, cols) = a.dims();
        if !a.is_square() {
            return Err(LinsysError::NotSquareMatrix { rows, cols });
        }
        if rows == 0 {
            return Err(LinsysError::InvalidDimensions(
                "Matrix A must have at least one row".to_string(),
            ));
        }
        if rows != b.len() {
            return Err(LinsysError::DimensionMismatch {
                expected: rows,
                found: b.len(),
            });
        }
        if let Some((row, col)) = a.first_non_finite() {
            return Err(LinsysError::NonFiniteEntry { row, col });
        }
        if let Some(i) = b.iter().position(|v| !v.is_finite()) {
            return Err(LinsysError::NonFiniteEntry { row: i, col: 0 });
        }
        Ok(())
    }
}

// --- Algorithm Implementations ---

pub mod cholesky;
pub mod classify;
pub mod doolittle;
pub mod partial_pivot_lu;
pub mod triangular_solve;

/// The factorization a direct solve went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveMethod {
    Cholesky,
    Doolittle,
    PartialPivotLu,
}

impl fmt::Display for SolveMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveMethod::Cholesky => "Cholesky",
            SolveMethod::Doolittle => "Doolittle LU",
            SolveMethod::PartialPivotLu => "LU with partial pivoting",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectSolveMetadata {
    pub method: SolveMethod,
    /// `||A x - b||_inf`, when requested.
    pub residual_norm: Option<f64>,
}

// --- Algorithm Struct Definitions ---
// Structs that represent specific algorithms and hold their parameters.

/// Cholesky solve for symmetric positive definite matrices.
/// Fails with `NotSymmetric` or `NotPositiveDefinite` instead of falling back to LU.
#[derive(Debug, Clone)]
pub struct Cholesky {
    pub compute_residual: bool,
}

impl Default for Cholesky {
    fn default() -> Self {
        Self {
            compute_residual: true,
        }
    }
}

impl Cholesky {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_params(compute_residual: bool) -> Self {
        Self { compute_residual }
    }
}

/// Doolittle LU solve, no pivoting.
#[derive(Debug, Clone)]
pub struct Doolittle {
    pub compute_residual: bool,
}

impl Default for Doolittle {
    fn default() -> Self {
        Self {
            compute_residual: true,
        }
    }
}

impl Doolittle {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_params(compute_residual: bool) -> Self {
        Self { compute_residual }
    }
}

/// LU solve with partial (row) pivoting.
#[derive(Debug, Clone)]
pub struct PartialPivotLu {
    pub compute_residual: bool,
}

impl Default for PartialPivotLu {
    fn default() -> Self {
        Self {
            compute_residual: true,
        }
    }
}

impl PartialPivotLu {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_params(compute_residual: bool) -> Self {
        Self { compute_residual }
    }
}

/// Infinity norm of `A x - b` as `f64`, or `None` when not requested.
pub(crate) fn residual_norm<T: linsys_core::Scalar>(
    enabled: bool,
    a: &linsys_core::DenseMatrix<T>,
    x: &[T],
    b: &[T],
) -> Result<Option<f64>, LinsysError> {
    if !enabled {
        return Ok(None);
    }
    let r = linsys_core::ops::residual(a, x, b)?;
    Ok(linsys_core::ops::norm_inf(&r).to_f64())
}
