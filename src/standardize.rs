//! Feature standardization and bias augmentation.
//!
//! `Standardizer` is a two-phase object: [`Standardizer::fit`] computes per-column
//! statistics once (on the training set) and [`Standardizer::apply`] is the only way to
//! normalize a feature matrix. Test data is therefore always scaled with training
//! statistics.
//!
//! `apply` returns the `(len, dim + 1)` design matrix: column 0 is the constant bias
//! column of 1s, columns `1..=dim` hold `(x - mean) / sqrt(variance)`.

use log::debug;

use crate::{Error, Features, Matrix, Result};

/// Per-column mean and variance of a training feature matrix.
///
/// Zero variances are stored as `1.0`, so those columns are only centered.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Moments {
    mean: Vec<f32>,
    variance: Vec<f32>,
}

impl Moments {
    /// Population mean/variance per column, with zero variances patched to 1.
    ///
    /// Returns the moments and the number of patched columns.
    fn compute(features: &Features) -> (Self, usize) {
        let dim = features.dim();
        let n = features.len() as f64;

        let mut sum = vec![0.0_f64; dim];
        let mut min = features.row(0).to_vec();
        let mut max = features.row(0).to_vec();
        for i in 0..features.len() {
            for (c, &x) in features.row(i).iter().enumerate() {
                sum[c] += f64::from(x);
                min[c] = min[c].min(x);
                max[c] = max[c].max(x);
            }
        }
        let mean: Vec<f64> = sum.iter().map(|s| s / n).collect();

        let mut sq = vec![0.0_f64; dim];
        for i in 0..features.len() {
            for (c, &x) in features.row(i).iter().enumerate() {
                let d = f64::from(x) - mean[c];
                sq[c] += d * d;
            }
        }

        let mut patched = 0;
        let mut out_mean = Vec::with_capacity(dim);
        let mut out_var = Vec::with_capacity(dim);
        for c in 0..dim {
            // Constant columns keep their exact value as mean so they center to 0.
            if min[c] == max[c] {
                out_mean.push(min[c]);
                out_var.push(1.0);
                patched += 1;
                continue;
            }
            let var = (sq[c] / n) as f32;
            out_mean.push(mean[c] as f32);
            if var == 0.0 {
                out_var.push(1.0);
                patched += 1;
            } else {
                out_var.push(var);
            }
        }

        (
            Self {
                mean: out_mean,
                variance: out_var,
            },
            patched,
        )
    }

    #[inline]
    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    /// Variances after the zero-variance patch.
    #[inline]
    pub fn variance(&self) -> &[f32] {
        &self.variance
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.mean.len()
    }
}

/// Fits column statistics once and normalizes any feature matrix with them.
#[derive(Debug, Clone, Default)]
pub struct Standardizer {
    moments: Option<Moments>,
}

impl Standardizer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.moments.is_some()
    }

    #[inline]
    pub fn moments(&self) -> Option<&Moments> {
        self.moments.as_ref()
    }

    /// Compute and cache per-column statistics.
    ///
    /// Returns [`Error::AlreadyFitted`] if statistics already exist; they never change.
    pub fn fit(&mut self, features: &Features) -> Result<()> {
        if self.moments.is_some() {
            return Err(Error::AlreadyFitted);
        }
        let (moments, patched) = Moments::compute(features);
        debug!(
            columns = moments.dim(),
            zero_variance = patched;
            "standardizer fitted"
        );
        self.moments = Some(moments);
        Ok(())
    }

    /// Standardize `features` with the cached statistics and prepend the bias column.
    pub fn apply(&self, features: &Features) -> Result<Matrix> {
        let moments = self.moments.as_ref().ok_or(Error::NotFitted)?;
        if features.dim() != moments.dim() {
            return Err(Error::ShapeMismatch {
                what: "feature columns",
                got: features.dim(),
                expected: moments.dim(),
            });
        }

        let std_dev: Vec<f32> = moments.variance.iter().map(|v| v.sqrt()).collect();
        let cols = features.dim() + 1;
        let mut out = Matrix::zeros(features.len(), cols);
        for i in 0..features.len() {
            let dst = out.row_mut(i);
            dst[0] = 1.0;
            for (c, &x) in features.row(i).iter().enumerate() {
                dst[c + 1] = (x - moments.mean[c]) / std_dev[c];
            }
        }
        Ok(out)
    }

    /// `fit` followed by `apply` on the same features.
    pub fn fit_apply(&mut self, features: &Features) -> Result<Matrix> {
        self.fit(features)?;
        self.apply(features)
    }
}
