//! Validated raw inputs.
//!
//! `Features` holds the raw `(len, dim)` feature matrix and `Labels` the paired
//! `(len, num_classes)` one-hot label matrix. Both are stored contiguously row-major and
//! validated at construction, so the engine only has to check how they relate to each
//! other.

use crate::metrics::argmax;
use crate::{Error, Matrix, MatrixView, Result};

/// Raw feature vectors (X), one row per example.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    matrix: Matrix,
}

impl Features {
    /// Build features from a flat buffer with shape `(len, dim)`.
    pub fn from_flat(values: Vec<f32>, dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidData("feature dim must be > 0".to_owned()));
        }
        if values.is_empty() {
            return Err(Error::InvalidData("features must not be empty".to_owned()));
        }
        if !values.len().is_multiple_of(dim) {
            return Err(Error::InvalidData(format!(
                "features length {} is not divisible by dim {dim}",
                values.len()
            )));
        }
        if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidData(format!(
                "feature value at row {} col {} is not finite",
                idx / dim,
                idx % dim
            )));
        }

        let len = values.len() / dim;
        Ok(Self {
            matrix: Matrix::from_flat(values, len, dim)?,
        })
    }

    /// Build features from per-example rows.
    ///
    /// This is a convenience constructor (it copies into contiguous storage).
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let dim = rows.first().map(|r| r.len()).unwrap_or(0);
        Self::from_flat(flatten(rows, dim, "feature")?, dim)
    }

    #[inline]
    /// Returns the number of examples.
    pub fn len(&self) -> usize {
        self.matrix.rows()
    }

    #[inline]
    /// Returns true if there are no examples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    /// Returns the raw feature dimension (without the bias column).
    pub fn dim(&self) -> usize {
        self.matrix.cols()
    }

    #[inline]
    pub fn row(&self, idx: usize) -> &[f32] {
        self.matrix.row(idx)
    }

    #[inline]
    pub fn as_matrix(&self) -> &Matrix {
        &self.matrix
    }
}

/// One-hot class labels (Y), one row per example.
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    matrix: Matrix,
}

impl Labels {
    /// Build labels from a flat one-hot buffer with shape `(len, num_classes)`.
    ///
    /// Every row must contain exactly one `1.0` and zeros elsewhere.
    pub fn from_flat(values: Vec<f32>, num_classes: usize) -> Result<Self> {
        if num_classes == 0 {
            return Err(Error::InvalidData("num_classes must be > 0".to_owned()));
        }
        if values.is_empty() {
            return Err(Error::InvalidData("labels must not be empty".to_owned()));
        }
        if !values.len().is_multiple_of(num_classes) {
            return Err(Error::InvalidData(format!(
                "labels length {} is not divisible by num_classes {num_classes}",
                values.len()
            )));
        }

        for (i, row) in values.chunks_exact(num_classes).enumerate() {
            let ones = row.iter().filter(|&&v| v == 1.0).count();
            let zeros = row.iter().filter(|&&v| v == 0.0).count();
            if ones != 1 || ones + zeros != num_classes {
                return Err(Error::InvalidData(format!(
                    "label row {i} is not one-hot: {row:?}"
                )));
            }
        }

        let len = values.len() / num_classes;
        Ok(Self {
            matrix: Matrix::from_flat(values, len, num_classes)?,
        })
    }

    /// Build labels from per-example one-hot rows.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self> {
        let num_classes = rows.first().map(|r| r.len()).unwrap_or(0);
        Self::from_flat(flatten(rows, num_classes, "label")?, num_classes)
    }

    /// One-hot encode class indices.
    ///
    /// Each `class` must be `< num_classes`.
    pub fn one_hot(classes: &[usize], num_classes: usize) -> Result<Self> {
        if num_classes == 0 {
            return Err(Error::InvalidData("num_classes must be > 0".to_owned()));
        }
        if classes.is_empty() {
            return Err(Error::InvalidData("labels must not be empty".to_owned()));
        }

        let mut values = vec![0.0_f32; classes.len() * num_classes];
        for (i, &class) in classes.iter().enumerate() {
            if class >= num_classes {
                return Err(Error::InvalidData(format!(
                    "class {class} at row {i} is out of range for {num_classes} classes"
                )));
            }
            values[i * num_classes + class] = 1.0;
        }

        Ok(Self {
            matrix: Matrix::from_flat(values, classes.len(), num_classes)?,
        })
    }

    #[inline]
    /// Returns the number of examples.
    pub fn len(&self) -> usize {
        self.matrix.rows()
    }

    #[inline]
    /// Returns true if there are no examples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn num_classes(&self) -> usize {
        self.matrix.cols()
    }

    #[inline]
    pub fn row(&self, idx: usize) -> &[f32] {
        self.matrix.row(idx)
    }

    #[inline]
    pub fn as_matrix(&self) -> &Matrix {
        &self.matrix
    }

    #[inline]
    pub fn view(&self) -> MatrixView<'_> {
        self.matrix.view()
    }

    /// Decode each one-hot row back into its class index.
    pub fn classes(&self) -> Vec<usize> {
        (0..self.len()).map(|i| argmax(self.row(i))).collect()
    }
}

fn flatten(rows: &[Vec<f32>], width: usize, what: &str) -> Result<Vec<f32>> {
    let mut flat = Vec::with_capacity(rows.len() * width);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(Error::InvalidData(format!(
                "{what} row {i} has len {}, expected {width}",
                row.len()
            )));
        }
        flat.extend_from_slice(row);
    }
    Ok(flat)
}
