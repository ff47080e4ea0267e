use linsys_core::{
    DenseMatrix, LinsysError, LowerTriangular, Matrix, Result, Scalar, UpperTriangular,
};
use log::debug;

use super::{
    residual_norm,
    triangular_solve::{backward_solve, forward_solve},
    DirectSolveMetadata, Doolittle, SolveAlgorithm, SolveMethod, SolveResult,
};

/// Doolittle LU factorization `a = L U` with a unit diagonal on `L`.
///
/// No row or column pivoting is performed. Matrices that need row exchanges fail
/// with `ZeroPivot { index }` where `index` is the first zero diagonal entry of `U`;
/// use [`super::partial_pivot_lu`] for those. Every diagonal entry of `U` is
/// checked, the last one included, so a singular `a` never produces factors.
/// A factor entry that overflows while computing row/column `index` fails with
/// `Overflow { index }`.
pub fn factor<T: Scalar>(
    a: &DenseMatrix<T>,
) -> Result<(LowerTriangular<T>, UpperTriangular<T>)> {
    let (rows, cols) = a.dims();
    if rows != cols {
        return Err(LinsysError::NotSquareMatrix { rows, cols });
    }
    let n = rows;
    let mut l = LowerTriangular::zeros(n);
    let mut u = UpperTriangular::zeros(n);

    for i in 0..n {
        // Row i of U
        for j in i..n {
            let sum = (0..i).fold(T::zero(), |acc, k| acc + l[(i, k)] * u[(k, j)]);
            u[(i, j)] = a[(i, j)] - sum;
            if !u[(i, j)].is_finite() {
                return Err(LinsysError::Overflow { index: i });
            }
        }

        l[(i, i)] = T::one();
        let pivot = u[(i, i)];
        if pivot == T::zero() {
            return Err(LinsysError::ZeroPivot { index: i });
        }

        // Column i of L
        for j in (i + 1)..n {
            let sum = (0..i).fold(T::zero(), |acc, k| acc + l[(j, k)] * u[(k, i)]);
            l[(j, i)] = (a[(j, i)] - sum) / pivot;
            if !l[(j, i)].is_finite() {
                return Err(LinsysError::Overflow { index: i });
            }
        }
    }
    Ok((l, u))
}

/// Solves `a x = b` from Doolittle factors: `L y = b`, then `U x = y`.
pub fn solve_factored<T: Scalar>(
    l: &LowerTriangular<T>,
    u: &UpperTriangular<T>,
    b: &[T],
) -> Result<Vec<T>> {
    let y = forward_solve(l, b)?;
    backward_solve(u, &y)
}

impl<T: Scalar> SolveAlgorithm<DenseMatrix<T>> for Doolittle {
    type Metadata = DirectSolveMetadata;

    fn solve(&self, a: &DenseMatrix<T>, b: &[T]) -> Result<SolveResult<T, Self::Metadata>> {
        self.validate_inputs(a, b)?;

        let (l, u) = factor(a)?;
        debug!("Doolittle factorization of {}x{} matrix succeeded", a.rows(), a.cols());
        let x = solve_factored(&l, &u, b)?;
        let residual_norm = residual_norm(self.compute_residual, a, &x, b)?;

        Ok(SolveResult {
            x,
            metadata: DirectSolveMetadata {
                method: SolveMethod::Doolittle,
                residual_norm,
            },
        })
    }
}
