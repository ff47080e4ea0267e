//! LU decomposition with partial pivoting.
//!
//! Opt-in alternative to Doolittle for matrices that need row exchanges.
//! Produces `P A = L U` with a unit diagonal on `L`; the solver never switches
//! to it on its own.

use linsys_core::{
    DenseMatrix, LinsysError, LowerTriangular, Matrix, Result, Scalar, UpperTriangular,
};
use log::debug;

use super::{
    residual_norm,
    triangular_solve::{backward_solve, forward_solve},
    DirectSolveMetadata, PartialPivotLu, SolveAlgorithm, SolveMethod, SolveResult,
};

/// Pivoted LU factors.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotedLu<T: Scalar> {
    pub l: LowerTriangular<T>,
    pub u: UpperTriangular<T>,
    /// Row `i` of `P A` is row `perm[i]` of `A`.
    pub perm: Vec<usize>,
}

impl<T: Scalar> PivotedLu<T> {
    /// Solve `A x = b` using the pre-computed factors.
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>> {
        if b.len() != self.perm.len() {
            return Err(LinsysError::DimensionMismatch {
                expected: self.perm.len(),
                found: b.len(),
            });
        }
        let pb: Vec<T> = self.perm.iter().map(|&p| b[p]).collect();
        let y = forward_solve(&self.l, &pb)?;
        backward_solve(&self.u, &y)
    }
}

/// Compute LU factorization with partial pivoting.
///
/// Fails with `ZeroPivot { index }` when every candidate in column `index` is zero,
/// and with `Overflow { index }` when eliminating column `index` leaves a non-finite entry.
pub fn factor<T: Scalar>(a: &DenseMatrix<T>) -> Result<PivotedLu<T>> {
    let (rows, cols) = a.dims();
    if rows != cols {
        return Err(LinsysError::NotSquareMatrix { rows, cols });
    }
    let n = rows;
    let mut work = a.clone();
    let mut perm: Vec<usize> = (0..n).collect();

    for k in 0..n {
        // Find pivot
        let mut max_val = work[(k, k)].abs();
        let mut max_row = k;
        for i in (k + 1)..n {
            let val = work[(i, k)].abs();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }
        if max_val == T::zero() {
            return Err(LinsysError::ZeroPivot { index: k });
        }

        if max_row != k {
            for j in 0..n {
                let tmp = work[(k, j)];
                work[(k, j)] = work[(max_row, j)];
                work[(max_row, j)] = tmp;
            }
            perm.swap(k, max_row);
        }

        // Multipliers stored below the diagonal
        let pivot = work[(k, k)];
        for i in (k + 1)..n {
            let mult = work[(i, k)] / pivot;
            work[(i, k)] = mult;
            for j in (k + 1)..n {
                work[(i, j)] = work[(i, j)] - mult * work[(k, j)];
                if !work[(i, j)].is_finite() {
                    return Err(LinsysError::Overflow { index: k });
                }
            }
        }
    }

    let mut l = LowerTriangular::zeros(n);
    let mut u = UpperTriangular::zeros(n);
    for i in 0..n {
        l[(i, i)] = T::one();
        for j in 0..i {
            l[(i, j)] = work[(i, j)];
        }
        for j in i..n {
            u[(i, j)] = work[(i, j)];
        }
    }
    Ok(PivotedLu { l, u, perm })
}

impl<T: Scalar> SolveAlgorithm<DenseMatrix<T>> for PartialPivotLu {
    type Metadata = DirectSolveMetadata;

    fn solve(&self, a: &DenseMatrix<T>, b: &[T]) -> Result<SolveResult<T, Self::Metadata>> {
        self.validate_inputs(a, b)?;

        let lu = factor(a)?;
        debug!("Pivoted LU of {}x{} matrix, permutation {:?}", a.rows(), a.cols(), lu.perm);
        let x = lu.solve(b)?;
        let residual_norm = residual_norm(self.compute_residual, a, &x, b)?;

        Ok(SolveResult {
            x,
            metadata: DirectSolveMetadata {
                method: SolveMethod::PartialPivotLu,
                residual_norm,
            },
        })
    }
}
