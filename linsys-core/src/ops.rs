// Dense matrix/vector operations used for verification and by the solvers.

use crate::{
    dense_matrix::DenseMatrix,
    error::{LinsysError, Result},
    traits::{Matrix, Scalar},
};

fn check_len(expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(LinsysError::DimensionMismatch { expected, found });
    }
    Ok(())
}

/// Computes `y = a * x`.
pub fn matvec<T: Scalar>(a: &DenseMatrix<T>, x: &[T]) -> Result<Vec<T>> {
    check_len(a.cols(), x.len())?;
    Ok((0..a.rows())
        .map(|i| {
            a.row(i)
                .iter()
                .zip(x)
                .fold(T::zero(), |acc, (&aij, &xj)| acc + aij * xj)
        })
        .collect())
}

/// Computes the matrix product `a * b` as a new matrix.
pub fn matmul<T: Scalar>(a: &DenseMatrix<T>, b: &DenseMatrix<T>) -> Result<DenseMatrix<T>> {
    check_len(a.cols(), b.rows())?;
    let mut c = DenseMatrix::zeros(a.rows(), b.cols());
    for i in 0..a.rows() {
        for k in 0..a.cols() {
            let aik = a[(i, k)];
            if aik == T::zero() {
                continue;
            }
            for j in 0..b.cols() {
                c[(i, j)] = c[(i, j)] + aik * b[(k, j)];
            }
        }
    }
    Ok(c)
}

/// Computes the residual `a * x - b`.
pub fn residual<T: Scalar>(a: &DenseMatrix<T>, x: &[T], b: &[T]) -> Result<Vec<T>> {
    check_len(a.rows(), b.len())?;
    let ax = matvec(a, x)?;
    Ok(ax.iter().zip(b).map(|(&axi, &bi)| axi - bi).collect())
}

/// Like `Float::max`, but a NaN on either side wins.
fn nan_max<T: Scalar>(acc: T, x: T) -> T {
    if acc.is_nan() || x.is_nan() {
        T::nan()
    } else {
        acc.max(x)
    }
}

/// Maximum absolute entry of `v` (zero for an empty slice, NaN if any entry is NaN).
pub fn norm_inf<T: Scalar>(v: &[T]) -> T {
    v.iter().fold(T::zero(), |acc, x| nan_max(acc, x.abs()))
}

/// Largest element-wise absolute difference between two equally sized matrices.
/// NaN anywhere in either matrix makes the result NaN.
pub fn max_abs_diff<T: Scalar>(a: &DenseMatrix<T>, b: &DenseMatrix<T>) -> Result<T> {
    if a.dims() != b.dims() {
        return Err(LinsysError::InvalidDimensions(format!(
            "Cannot compare {}x{} with {}x{}",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    Ok(a.data()
        .iter()
        .zip(b.data())
        .fold(T::zero(), |acc, (&x, &y)| nan_max(acc, (x - y).abs())))
}
