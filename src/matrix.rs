//! Dense row-major matrices.
//!
//! `Matrix` owns its buffer; `MatrixView` borrows a contiguous block of rows. Batches in
//! the training loop are views into the standardized training matrix, so slicing a batch
//! never copies.

use crate::matmul::{Operand, gemm};
use crate::{Error, Result};

/// An owned `(rows, cols)` matrix stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

/// A borrowed `(rows, cols)` row-major matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixView<'a> {
    rows: usize,
    cols: usize,
    data: &'a [f32],
}

impl Matrix {
    /// A `(rows, cols)` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build a matrix from a flat row-major buffer.
    pub fn from_flat(data: Vec<f32>, rows: usize, cols: usize) -> Result<Self> {
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| Error::InvalidData("matrix shape overflow".to_owned()))?;
        if data.len() != expected {
            return Err(Error::InvalidData(format!(
                "buffer length {} does not match rows * cols ({rows} * {cols})",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Returns the element at `(row, col)`.
    ///
    /// Panics if out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds"
        );
        self.data[row * self.cols + col]
    }

    /// Returns the `idx`-th row.
    ///
    /// Panics if `idx >= rows`.
    #[inline]
    pub fn row(&self, idx: usize) -> &[f32] {
        let start = idx * self.cols;
        &self.data[start..start + self.cols]
    }

    #[inline]
    pub(crate) fn row_mut(&mut self, idx: usize) -> &mut [f32] {
        let start = idx * self.cols;
        &mut self.data[start..start + self.cols]
    }

    #[inline]
    pub fn view(&self) -> MatrixView<'_> {
        MatrixView {
            rows: self.rows,
            cols: self.cols,
            data: &self.data,
        }
    }

    /// Borrow rows `[start, start + len)`.
    ///
    /// Panics if the range exceeds the matrix.
    #[inline]
    pub fn row_range(&self, start: usize, len: usize) -> MatrixView<'_> {
        self.view().row_range(start, len)
    }

    /// Matrix product `self * rhs`.
    pub fn matmul(&self, rhs: &Matrix) -> Matrix {
        self.view().matmul(rhs.view())
    }
}

impl<'a> MatrixView<'a> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    #[inline]
    pub fn row(&self, idx: usize) -> &'a [f32] {
        let start = idx * self.cols;
        &self.data[start..start + self.cols]
    }

    #[inline]
    pub fn row_range(&self, start: usize, len: usize) -> MatrixView<'a> {
        assert!(
            start + len <= self.rows,
            "row range {start}..{} exceeds {} rows",
            start + len,
            self.rows
        );
        MatrixView {
            rows: len,
            cols: self.cols,
            data: &self.data[start * self.cols..(start + len) * self.cols],
        }
    }

    /// Matrix product `self * rhs`.
    ///
    /// Panics if `self.cols() != rhs.rows()`.
    pub fn matmul(&self, rhs: MatrixView<'_>) -> Matrix {
        assert_eq!(
            self.cols, rhs.rows,
            "lhs cols {} do not match rhs rows {}",
            self.cols, rhs.rows
        );
        let mut out = Matrix::zeros(self.rows, rhs.cols);
        gemm(
            self.rows,
            rhs.cols,
            self.cols,
            Operand::row_major(self.data, self.cols),
            Operand::row_major(rhs.data, rhs.cols),
            out.as_mut_slice(),
        );
        out
    }

    /// Matrix product `self^T * rhs` without materializing the transpose.
    ///
    /// Panics if `self.rows() != rhs.rows()`.
    pub fn t_matmul(&self, rhs: MatrixView<'_>) -> Matrix {
        assert_eq!(
            self.rows, rhs.rows,
            "lhs rows {} do not match rhs rows {}",
            self.rows, rhs.rows
        );
        let mut out = Matrix::zeros(self.cols, rhs.cols);
        gemm(
            self.cols,
            rhs.cols,
            self.rows,
            Operand::transposed(self.data, self.cols),
            Operand::row_major(rhs.data, rhs.cols),
            out.as_mut_slice(),
        );
        out
    }
}
