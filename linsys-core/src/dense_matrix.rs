use crate::error::{LinsysError, Result};
use crate::traits::{Matrix, Scalar};
use std::ops::{Index, IndexMut};

/// Represents a dense matrix stored in row-major order on the CPU.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T: Scalar> {
    rows: usize,
    cols: usize,
    data: Vec<T>, // Data stored row-major: data[row * cols + col]
}

impl<T: Scalar> DenseMatrix<T> {
    /// Creates a new DenseMatrix from raw data, dimensions, assuming row-major order.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(LinsysError::InvalidDimensions(format!(
                "Data length ({}) does not match dimensions ({}x{})",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a new DenseMatrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::zero(); rows * cols],
        }
    }

    /// Creates the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Builds a matrix from a list of rows.
    ///
    /// Every row must have the same length and there must be at least one
    /// non-empty row; jagged input is rejected rather than padded.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self> {
        let cols = match rows.first() {
            Some(first) => first.as_ref().len(),
            None => {
                return Err(LinsysError::InvalidDimensions(
                    "Matrix must have at least one row".to_string(),
                ))
            }
        };
        if cols == 0 {
            return Err(LinsysError::InvalidDimensions(
                "Matrix must have at least one column".to_string(),
            ));
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(LinsysError::InvalidDimensions(format!(
                    "Row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Returns a slice view of the underlying data vector.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns a mutable slice view of the underlying data vector.
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Returns row `row` as a slice. Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Gets the element at the specified row and column (immutable).
    /// Returns None if indices are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Gets the element at the specified row and column (mutable).
    /// Returns None if indices are out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if row < self.rows && col < self.cols {
            self.data.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Returns a new matrix holding the transpose of `self`.
    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t[(j, i)] = self[(i, j)];
            }
        }
        t
    }
}

impl<T: Scalar> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for DenseMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

// Implement the generic Matrix trait
impl<T: Scalar> Matrix for DenseMatrix<T> {
    type Value = T;

    fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn get(&self, row: usize, col: usize) -> Option<T> {
        DenseMatrix::get(self, row, col).copied()
    }

    // rows(), cols(), is_square() are provided by default impls in the trait
}

#[cfg(test)]
mod tests {
    use crate::{DenseMatrix, LinsysError, Matrix};

    #[test]
    fn test_dense_matrix_new() {
        let matrix = DenseMatrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(matrix.dims(), (2, 3));
        assert_eq!(matrix.row(1), &[4.0, 5.0, 6.0]);
        assert!(!matrix.is_square());
    }

    #[test]
    fn test_dense_matrix_new_invalid_len() {
        let matrix = DenseMatrix::new(2, 2, vec![1.0_f64, 2.0, 3.0]);
        match matrix.err().unwrap() {
            LinsysError::InvalidDimensions(msg) => assert!(msg.contains("Data length (3)")),
            _ => panic!("Expected InvalidDimensions error"),
        }
    }

    #[test]
    fn test_dense_matrix_from_rows() {
        let matrix = DenseMatrix::from_rows(&[[1.0_f64, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(matrix.dims(), (2, 2));
        assert_eq!(matrix.data(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(matrix[(1, 0)], 3.0);
    }

    #[test]
    fn test_dense_matrix_from_rows_jagged() {
        let rows = vec![vec![1.0_f64, 2.0, 3.0], vec![4.0, 5.0]];
        match DenseMatrix::from_rows(&rows).err().unwrap() {
            LinsysError::InvalidDimensions(msg) => {
                assert!(msg.contains("Row 1 has 2 entries, expected 3"))
            }
            _ => panic!("Expected InvalidDimensions error"),
        }
    }

    #[test]
    fn test_dense_matrix_from_rows_empty() {
        let rows: Vec<Vec<f64>> = Vec::new();
        assert!(DenseMatrix::from_rows(&rows).is_err());
        let rows: Vec<Vec<f64>> = vec![vec![]];
        assert!(DenseMatrix::from_rows(&rows).is_err());
    }

    #[test]
    fn test_dense_matrix_get() {
        let mut matrix = DenseMatrix::<f64>::zeros(2, 3);
        *matrix.get_mut(1, 2).unwrap() = 7.0;
        assert_eq!(matrix.get(1, 2), Some(&7.0));
        assert_eq!(matrix.get(0, 0), Some(&0.0));
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.get(0, 3), None);
        assert!(matrix.get_mut(5, 5).is_none());
    }

    #[test]
    fn test_dense_matrix_transpose() {
        let matrix = DenseMatrix::from_rows(&[[1.0_f64, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
        let t = matrix.transpose();
        assert_eq!(t.dims(), (3, 2));
        assert_eq!(t.data(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
        // Input untouched
        assert_eq!(matrix.dims(), (2, 3));
    }

    #[test]
    fn test_identity_and_non_finite_scan() {
        let mut matrix = DenseMatrix::<f64>::identity(3);
        assert_eq!(matrix.first_non_finite(), None);
        matrix[(2, 1)] = f64::NAN;
        matrix[(1, 2)] = f64::INFINITY;
        assert_eq!(matrix.first_non_finite(), Some((1, 2)));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds_panics() {
        let matrix = DenseMatrix::<f64>::zeros(2, 2);
        let _ = matrix[(2, 0)];
    }
}
