use linsys_core::{LinsysError, LowerTriangular, Result, Scalar, UpperTriangular};

fn check_rhs(n: usize, len: usize) -> Result<()> {
    if n != len {
        return Err(LinsysError::DimensionMismatch {
            expected: n,
            found: len,
        });
    }
    Ok(())
}

/// Solves `L y = b` by forward substitution, increasing index order.
///
/// # Errors
/// `DimensionMismatch` if `b` does not match `L`, `SingularTriangular` on the
/// first zero diagonal entry encountered. `Overflow` if an entry of `y` is not finite.
pub fn forward_solve<T: Scalar>(l: &LowerTriangular<T>, b: &[T]) -> Result<Vec<T>> {
    let n = l.dim();
    check_rhs(n, b.len())?;

    let mut y = vec![T::zero(); n];
    for i in 0..n {
        let diag = l[(i, i)];
        if diag == T::zero() {
            return Err(LinsysError::SingularTriangular { index: i });
        }
        let sum = (0..i).fold(T::zero(), |acc, j| acc + l[(i, j)] * y[j]);
        y[i] = (b[i] - sum) / diag;
        if !y[i].is_finite() {
            return Err(LinsysError::Overflow { index: i });
        }
    }
    Ok(y)
}

/// Solves `U x = y` by backward substitution, decreasing index order.
///
/// # Errors
/// `DimensionMismatch` if `y` does not match `U`, `SingularTriangular` on the
/// first zero diagonal entry encountered (counting from the bottom).
/// `Overflow` if an entry of `x` is not finite.
pub fn backward_solve<T: Scalar>(u: &UpperTriangular<T>, y: &[T]) -> Result<Vec<T>> {
    let n = u.dim();
    check_rhs(n, y.len())?;

    let mut x = vec![T::zero(); n];
    for i in (0..n).rev() {
        let diag = u[(i, i)];
        if diag == T::zero() {
            return Err(LinsysError::SingularTriangular { index: i });
        }
        let sum = ((i + 1)..n).fold(T::zero(), |acc, j| acc + u[(i, j)] * x[j]);
        x[i] = (y[i] - sum) / diag;
        if !x[i].is_finite() {
            return Err(LinsysError::Overflow { index: i });
        }
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use linsys_core::ops::matvec;

    fn lower_3x3() -> LowerTriangular<f64> {
        let mut l = LowerTriangular::zeros(3);
        l[(0, 0)] = 2.0;
        l[(1, 0)] = -1.0;
        l[(1, 1)] = 4.0;
        l[(2, 0)] = 0.5;
        l[(2, 1)] = 3.0;
        l[(2, 2)] = -5.0;
        l
    }

    #[test]
    fn test_forward_solve_reconstructs_rhs() {
        let l = lower_3x3();
        let b = [4.0, 6.0, -2.5];
        let y = forward_solve(&l, &b).unwrap();
        let ly = matvec(l.as_dense(), &y).unwrap();
        for i in 0..3 {
            assert_abs_diff_eq!(ly[i], b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_backward_solve_reconstructs_rhs() {
        let u = lower_3x3().transpose();
        let y = [1.0, -3.0, 10.0];
        let x = backward_solve(&u, &y).unwrap();
        let ux = matvec(u.as_dense(), &x).unwrap();
        for i in 0..3 {
            assert_abs_diff_eq!(ux[i], y[i], epsilon = 1e-12);
        }
        // Last unknown is determined by the last row alone.
        assert_abs_diff_eq!(x[2], -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_diagonal_is_singular() {
        let mut l = lower_3x3();
        l[(1, 1)] = 0.0;
        assert_eq!(
            forward_solve(&l, &[1.0, 1.0, 1.0]).err(),
            Some(LinsysError::SingularTriangular { index: 1 })
        );
        assert_eq!(
            backward_solve(&l.transpose(), &[1.0, 1.0, 1.0]).err(),
            Some(LinsysError::SingularTriangular { index: 1 })
        );
    }

    #[test]
    fn test_overflowing_entry_is_rejected() {
        let mut l = LowerTriangular::zeros(2);
        l[(0, 0)] = 1e-300_f64;
        l[(1, 0)] = 1.0;
        l[(1, 1)] = 1.0;
        // y[0] = 1e300 / 1e-300 overflows.
        assert_eq!(
            forward_solve(&l, &[1e300, 1.0]).err(),
            Some(LinsysError::Overflow { index: 0 })
        );

        let mut u = UpperTriangular::zeros(2);
        u[(0, 0)] = 1.0_f64;
        u[(0, 1)] = 1.0;
        u[(1, 1)] = 1e-300;
        // x[1] = 1e10 / 1e-300 overflows before x[0] is reached.
        assert_eq!(
            backward_solve(&u, &[1.0, 1e10]).err(),
            Some(LinsysError::Overflow { index: 1 })
        );
    }

    #[test]
    fn test_rhs_length_mismatch() {
        let l = lower_3x3();
        assert_eq!(
            forward_solve(&l, &[1.0, 2.0]).err(),
            Some(LinsysError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
    }
}
