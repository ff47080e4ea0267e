use num_traits::Float;
use std::fmt::Debug;

/// Numeric element type accepted by every matrix and solver in this workspace.
/// `f64` is the reference instantiation; `f32` works with reduced accuracy.
pub trait Scalar: Float + Debug + Default + Send + Sync + 'static {}

impl<T> Scalar for T where T: Float + Debug + Default + Send + Sync + 'static {}

/// Generic trait representing a matrix.
/// Implemented by the dense matrix and the triangular matrix types.
pub trait Matrix: Debug {
    /// The underlying numeric type of the matrix elements (e.g., f64).
    type Value: Scalar;

    /// Returns the dimensions of the matrix as (rows, columns).
    fn dims(&self) -> (usize, usize);

    /// Gets the element at the specified row and column.
    /// Returns None if indices are out of bounds.
    fn get(&self, row: usize, col: usize) -> Option<Self::Value>;

    /// Returns the number of rows.
    fn rows(&self) -> usize {
        self.dims().0
    }

    /// Returns the number of columns.
    fn cols(&self) -> usize {
        self.dims().1
    }

    /// Checks if the matrix is square.
    fn is_square(&self) -> bool {
        let (rows, cols) = self.dims();
        rows == cols
    }

    /// Returns the position of the first NaN or infinite entry in row-major order.
    fn first_non_finite(&self) -> Option<(usize, usize)> {
        let (rows, cols) = self.dims();
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .find(|&(row, col)| self.get(row, col).is_some_and(|v| !v.is_finite()))
    }
}
