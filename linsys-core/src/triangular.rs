//! Square triangular matrices whose opposite triangle is zero by construction.
//!
//! A triangular matrix starts out as all zeros and only accepts writes on its
//! own side of the diagonal, so there is no way to build one that violates the
//! triangular shape. They are produced by the factorizations in
//! `linsys-lsolver` and consumed by the triangular solves.

use crate::dense_matrix::DenseMatrix;
use crate::traits::{Matrix, Scalar};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// Which side of the diagonal a triangular matrix may populate.
pub trait Side: Debug + Clone + Copy + PartialEq + 'static {
    /// The side obtained after transposing.
    type Transposed: Side<Transposed = Self>;

    /// Human readable name used in panic messages.
    const NAME: &'static str;

    /// Whether `(row, col)` lies inside the writable triangle (diagonal included).
    fn contains(row: usize, col: usize) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lower;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Upper;

impl Side for Lower {
    type Transposed = Upper;
    const NAME: &'static str = "lower";

    fn contains(row: usize, col: usize) -> bool {
        col <= row
    }
}

impl Side for Upper {
    type Transposed = Lower;
    const NAME: &'static str = "upper";

    fn contains(row: usize, col: usize) -> bool {
        col >= row
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Triangular<T: Scalar, S: Side> {
    inner: DenseMatrix<T>,
    _side: PhantomData<S>,
}

pub type LowerTriangular<T> = Triangular<T, Lower>;
pub type UpperTriangular<T> = Triangular<T, Upper>;

impl<T: Scalar, S: Side> Triangular<T, S> {
    /// Creates an `n x n` triangular matrix filled with zeros.
    pub fn zeros(n: usize) -> Self {
        Self {
            inner: DenseMatrix::zeros(n, n),
            _side: PhantomData,
        }
    }

    /// Matrix dimension `n`.
    pub fn dim(&self) -> usize {
        self.inner.rows()
    }

    pub fn diagonal(&self) -> Vec<T> {
        (0..self.dim()).map(|i| self.inner[(i, i)]).collect()
    }

    pub fn as_dense(&self) -> &DenseMatrix<T> {
        &self.inner
    }

    pub fn into_dense(self) -> DenseMatrix<T> {
        self.inner
    }

    /// Returns the transpose as a new matrix of the opposite side.
    pub fn transpose(&self) -> Triangular<T, S::Transposed> {
        Triangular {
            inner: self.inner.transpose(),
            _side: PhantomData,
        }
    }
}

impl<T: Scalar, S: Side> Index<(usize, usize)> for Triangular<T, S> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &T {
        &self.inner[index]
    }
}

impl<T: Scalar, S: Side> IndexMut<(usize, usize)> for Triangular<T, S> {
    /// Panics when `(row, col)` falls outside the triangle.
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            S::contains(row, col),
            "index ({}, {}) is outside the {} triangle",
            row,
            col,
            S::NAME
        );
        &mut self.inner[(row, col)]
    }
}

impl<T: Scalar, S: Side> Matrix for Triangular<T, S> {
    type Value = T;

    fn dims(&self) -> (usize, usize) {
        self.inner.dims()
    }

    fn get(&self, row: usize, col: usize) -> Option<T> {
        self.inner.get(row, col).copied()
    }
}
