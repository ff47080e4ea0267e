use linsys_core::{DenseMatrix, LowerTriangular, Matrix, Result, Scalar};
use log::trace;

use super::cholesky;

/// Outcome of classifying a coefficient matrix.
///
/// When the matrix is symmetric and the Cholesky probe succeeded, the factor is
/// kept so the solver does not have to compute it a second time.
#[derive(Debug, Clone)]
pub struct Classification<T: Scalar> {
    pub symmetric: bool,
    pub cholesky_factor: Option<LowerTriangular<T>>,
}

impl<T: Scalar> Classification<T> {
    pub fn is_positive_definite(&self) -> bool {
        self.cholesky_factor.is_some()
    }

    /// Symmetric positive definite: the Cholesky path applies.
    pub fn is_spd(&self) -> bool {
        self.symmetric && self.is_positive_definite()
    }
}

/// Checks `|a[i][j] - a[j][i]| <= tolerance` for every pair `i <= j`.
///
/// With `tolerance == 0.0` this is exact equality. Non-square matrices are never
/// symmetric; any 1x1 matrix is.
pub fn is_symmetric<T: Scalar>(a: &DenseMatrix<T>, tolerance: f64) -> bool {
    a.is_square() && first_asymmetry(a, tolerance).is_none()
}

/// First pair `(i, j)` with `i < j`, in row-major order, whose entries differ
/// by more than `tolerance`. Only meaningful for square matrices.
pub fn first_asymmetry<T: Scalar>(a: &DenseMatrix<T>, tolerance: f64) -> Option<(usize, usize)> {
    let n = a.rows().min(a.cols());
    let tol = T::from(tolerance).unwrap_or_else(T::zero);
    for i in 0..n {
        for j in i..n {
            let (x, y) = (a[(i, j)], a[(j, i)]);
            // `!(<=)` so NaN counts as a mismatch.
            if x != y && !((x - y).abs() <= tol) {
                trace!("symmetry mismatch at ({}, {})", i, j);
                return Some((i, j));
            }
        }
    }
    None
}

/// Attempts a Cholesky factorization and returns the factor on success.
///
/// This is the positive definiteness probe; callers that only need a yes/no
/// answer use [`is_positive_definite`]. Symmetry is not checked here: the
/// factorization only reads the lower triangle, so callers check [`is_symmetric`] first.
pub fn probe_positive_definite<T: Scalar>(a: &DenseMatrix<T>) -> Result<LowerTriangular<T>> {
    cholesky::factor(a)
}

/// Whether the Cholesky probe succeeds on `a`. The computed factor is discarded.
pub fn is_positive_definite<T: Scalar>(a: &DenseMatrix<T>) -> bool {
    probe_positive_definite(a).is_ok()
}

/// Classifies `a`. The positive definiteness probe only runs when `a` is symmetric.
pub fn classify<T: Scalar>(a: &DenseMatrix<T>, symmetry_tolerance: f64) -> Classification<T> {
    let symmetric = is_symmetric(a, symmetry_tolerance);
    let cholesky_factor = if symmetric {
        match probe_positive_definite(a) {
            Ok(l) => Some(l),
            Err(e) => {
                trace!("positive definiteness probe failed: {}", e);
                None
            }
        }
    } else {
        None
    };
    Classification {
        symmetric,
        cholesky_factor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_symmetric_exact() {
        let a = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [2.0, 3.0]]).unwrap();
        assert!(is_symmetric(&a, 0.0));
        let b = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [2.0 + 1e-13, 3.0]]).unwrap();
        assert!(!is_symmetric(&b, 0.0));
    }

    #[test]
    fn test_is_symmetric_with_tolerance() {
        let b = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [2.0 + 1e-13, 3.0]]).unwrap();
        assert!(is_symmetric(&b, 1e-12));
        assert!(!is_symmetric(&b, 1e-14));
    }

    #[test]
    fn test_is_symmetric_edge_cases() {
        let single = DenseMatrix::from_rows(&[[-7.0_f64]]).unwrap();
        assert!(is_symmetric(&single, 0.0));
        let rect = DenseMatrix::<f64>::zeros(2, 3);
        assert!(!is_symmetric(&rect, 0.0));
        let nan = DenseMatrix::from_rows(&[[1.0_f64, f64::NAN], [f64::NAN, 1.0]]).unwrap();
        assert!(!is_symmetric(&nan, 1.0));
    }

    #[test]
    fn test_first_asymmetry_reports_pair() {
        let a = DenseMatrix::from_rows(&[
            [1.0_f64, 2.0, 3.0],
            [2.0, 1.0, 5.0],
            [3.0, 4.0, 1.0],
        ])
        .unwrap();
        assert_eq!(first_asymmetry(&a, 0.0), Some((1, 2)));
        assert_eq!(first_asymmetry(&a, 1.0), None);
    }

    #[test]
    fn test_is_positive_definite() {
        let spd = DenseMatrix::from_rows(&[[2.0_f64, 1.0], [1.0, 2.0]]).unwrap();
        assert!(is_positive_definite(&spd));
        let indefinite = DenseMatrix::from_rows(&[[1.0_f64, 3.0], [3.0, 1.0]]).unwrap();
        assert!(!is_positive_definite(&indefinite));
        let negative = DenseMatrix::from_rows(&[[-1.0_f64]]).unwrap();
        assert!(!is_positive_definite(&negative));
    }

    #[test]
    fn test_classify_keeps_probe_factor() {
        let spd = DenseMatrix::from_rows(&[[2.0_f64, 1.0], [1.0, 2.0]]).unwrap();
        let c = classify(&spd, 0.0);
        assert!(c.is_spd());
        let l = c.cholesky_factor.unwrap();
        assert_eq!(l, cholesky::factor(&spd).unwrap());
    }

    #[test]
    fn test_classify_skips_probe_for_non_symmetric() {
        // Lower triangle alone would factor fine.
        let a = DenseMatrix::from_rows(&[[4.0_f64, 9.0], [1.0, 3.0]]).unwrap();
        let c = classify(&a, 0.0);
        assert!(!c.symmetric);
        assert!(c.cholesky_factor.is_none());
        assert!(!c.is_spd());
    }
}
