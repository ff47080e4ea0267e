use linsys_core::{DenseMatrix, LinsysError, LowerTriangular, Matrix, Result, Scalar};
use log::debug;

use super::{
    classify::first_asymmetry,
    residual_norm,
    triangular_solve::{backward_solve, forward_solve},
    Cholesky, DirectSolveMetadata, SolveAlgorithm, SolveMethod, SolveResult,
};

/// Factors a symmetric positive definite `a` into `L L^T` and returns `L`.
///
/// Works column by column: the diagonal entry
/// `L[j][j] = sqrt(a[j][j] - sum_k L[j][k]^2)` first, then the entries below it.
/// Only the lower triangle of `a` is read, so the caller must make sure `a` is
/// symmetric; a non-symmetric `a` silently factors its mirrored lower triangle.
/// A pivot under the square root that is not strictly positive (NaN included)
/// fails with `NotPositiveDefinite`. An entry of `L` that overflows in column
/// `j` fails with `Overflow { index: j }`.
pub fn factor<T: Scalar>(a: &DenseMatrix<T>) -> Result<LowerTriangular<T>> {
    let (rows, cols) = a.dims();
    if rows != cols {
        return Err(LinsysError::NotSquareMatrix { rows, cols });
    }
    let n = rows;
    let mut l = LowerTriangular::zeros(n);

    for j in 0..n {
        let sum_sq = (0..j).fold(T::zero(), |acc, k| acc + l[(j, k)] * l[(j, k)]);
        let pivot = a[(j, j)] - sum_sq;
        if !(pivot > T::zero()) {
            return Err(LinsysError::NotPositiveDefinite {
                column: j,
                pivot: pivot.to_f64().unwrap_or(f64::NAN),
            });
        }
        let diag = pivot.sqrt();
        l[(j, j)] = diag;

        for i in (j + 1)..n {
            let sum = (0..j).fold(T::zero(), |acc, k| acc + l[(i, k)] * l[(j, k)]);
            l[(i, j)] = (a[(i, j)] - sum) / diag;
            if !l[(i, j)].is_finite() {
                return Err(LinsysError::Overflow { index: j });
            }
        }
    }
    Ok(l)
}

/// Solves `a x = b` given the Cholesky factor `l` of `a`.
/// Forward substitution against `L`, then backward substitution against an explicit `L^T`.
pub fn solve_factored<T: Scalar>(l: &LowerTriangular<T>, b: &[T]) -> Result<Vec<T>> {
    let y = forward_solve(l, b)?;
    let lt = l.transpose();
    backward_solve(&lt, &y)
}

impl<T: Scalar> SolveAlgorithm<DenseMatrix<T>> for Cholesky {
    type Metadata = DirectSolveMetadata;

    fn solve(
        &self,
        a: &DenseMatrix<T>,
        b: &[T],
    ) -> Result<SolveResult<T, Self::Metadata>> {
        self.validate_inputs(a, b)?;
        if let Some((row, col)) = first_asymmetry(a, 0.0) {
            return Err(LinsysError::NotSymmetric { row, col });
        }

        let l = factor(a)?;
        debug!("Cholesky factorization of {}x{} matrix succeeded", a.rows(), a.cols());
        let x = solve_factored(&l, b)?;
        let residual_norm = residual_norm(self.compute_residual, a, &x, b)?;

        Ok(SolveResult {
            x,
            metadata: DirectSolveMetadata {
                method: SolveMethod::Cholesky,
                residual_norm,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use linsys_core::ops::{matmul, max_abs_diff};

    fn spd_4x4() -> DenseMatrix<f64> {
        DenseMatrix::from_rows(&[
            [1.0_f64, -1.0, 3.0, 2.0],
            [-1.0, 5.0, -5.0, -2.0],
            [3.0, -5.0, 19.0, 3.0],
            [2.0, -2.0, 3.0, 21.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_factor_reconstructs_matrix() {
        let a = spd_4x4();
        let l = factor(&a).unwrap();
        let llt = matmul(l.as_dense(), l.transpose().as_dense()).unwrap();
        assert!(max_abs_diff(&llt, &a).unwrap() < 1e-9);
        // Strictly upper part stays zero.
        for i in 0..4 {
            for j in (i + 1)..4 {
                assert_eq!(l[(i, j)], 0.0);
            }
        }
        assert!(l.diagonal().iter().all(|&d| d > 0.0));
    }

    #[test]
    fn test_factor_integer_factor() {
        let l = factor(&spd_4x4()).unwrap();
        let expected = [
            [1.0, 0.0, 0.0, 0.0],
            [-1.0, 2.0, 0.0, 0.0],
            [3.0, -1.0, 3.0, 0.0],
            [2.0, 0.0, -1.0, 4.0],
        ];
        for (i, row) in expected.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                assert_abs_diff_eq!(l[(i, j)], v, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_factor_known_values() {
        // [[4, 2], [2, 3]] = [[2, 0], [1, sqrt(2)]] * transpose
        let a = DenseMatrix::from_rows(&[[4.0_f64, 2.0], [2.0, 3.0]]).unwrap();
        let l = factor(&a).unwrap();
        assert_abs_diff_eq!(l[(0, 0)], 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(l[(1, 0)], 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(l[(1, 1)], 2.0_f64.sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn test_factor_rejects_indefinite() {
        let a = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [2.0, 1.0]]).unwrap();
        match factor(&a) {
            Err(LinsysError::NotPositiveDefinite { column, pivot }) => {
                assert_eq!(column, 1);
                assert_abs_diff_eq!(pivot, -3.0, epsilon = 1e-12);
            }
            other => panic!("Expected NotPositiveDefinite, got {:?}", other),
        }
    }

    #[test]
    fn test_factor_rejects_zero_pivot() {
        let a = DenseMatrix::from_rows(&[[0.0_f64, 0.0], [0.0, 1.0]]).unwrap();
        assert!(matches!(
            factor(&a),
            Err(LinsysError::NotPositiveDefinite { column: 0, .. })
        ));
    }

    #[test]
    fn test_factor_rejects_non_square() {
        let a = DenseMatrix::<f64>::zeros(2, 3);
        assert_eq!(
            factor(&a).err(),
            Some(LinsysError::NotSquareMatrix { rows: 2, cols: 3 })
        );
    }

    #[test]
    fn test_cholesky_algorithm_rejects_non_symmetric() {
        // The lower triangle is that of an SPD matrix, the upper one is not.
        let a = DenseMatrix::from_rows(&[[4.0_f64, 9.0], [1.0, 3.0]]).unwrap();
        assert!(factor(&a).is_ok());
        assert_eq!(
            Cholesky::new().solve(&a, &[1.0, 1.0]).err(),
            Some(LinsysError::NotSymmetric { row: 0, col: 1 })
        );
    }

    #[test]
    fn test_cholesky_algorithm_solves() {
        let a = spd_4x4();
        let b = [15.0, -35.0, 94.0, 1.0];
        let result = Cholesky::new().solve(&a, &b).unwrap();
        assert_eq!(result.metadata.method, SolveMethod::Cholesky);
        assert!(result.metadata.residual_norm.unwrap() < 1e-9);
    }
}
