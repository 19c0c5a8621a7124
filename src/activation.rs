//! Output link functions.
//!
//! The engine turns raw class scores `X * W` into probabilities in two ways:
//!
//! - `Softmax`: row-wise, a distribution over the K classes. Used by the gradient step
//!   and by prediction.
//! - `Sigmoid`: element-wise, each class scored independently. Used by cost recording.

use crate::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Softmax,
    Sigmoid,
}

impl Activation {
    /// Apply the activation in place to a `(rows, classes)` score matrix.
    pub fn apply(self, scores: &mut Matrix) {
        match self {
            Activation::Softmax => {
                for i in 0..scores.rows() {
                    softmax_in_place(scores.row_mut(i));
                }
            }
            Activation::Sigmoid => {
                for v in scores.as_mut_slice() {
                    *v = sigmoid(*v);
                }
            }
        }
    }
}

/// Numerically stable softmax over one row of scores.
#[inline]
pub fn softmax_in_place(row: &mut [f32]) {
    if row.is_empty() {
        return;
    }
    let max = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut sum = 0.0_f32;
    for v in row.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    let inv_sum = 1.0 / sum;
    for v in row.iter_mut() {
        *v *= inv_sum;
    }
}

#[inline]
pub fn sigmoid(x: f32) -> f32 {
    // Numerically stable sigmoid.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn softmax_rows_sum_to_one() {
        let mut m = Matrix::from_flat(vec![1.0, 2.0, 3.0, 1000.0, 0.0, -1000.0], 2, 3).unwrap();
        Activation::Softmax.apply(&mut m);
        for i in 0..2 {
            let sum: f32 = m.row(i).iter().sum();
            assert!((sum - 1.0).abs() < 1e-6);
            assert!(m.row(i).iter().all(|v| v.is_finite()));
        }
        assert!(m.get(0, 2) > m.get(0, 1) && m.get(0, 1) > m.get(0, 0));
    }

    #[test]
    fn uniform_scores_give_uniform_softmax() {
        let mut row = [0.0_f32; 4];
        softmax_in_place(&mut row);
        assert!(row.iter().all(|&v| (v - 0.25).abs() < 1e-7));
    }

    #[test]
    fn sigmoid_basic_values() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(10.0) > 0.999);
        assert!(sigmoid(-10.0) < 0.001);

        let mut m = Matrix::from_flat(vec![0.0, 0.0], 1, 2).unwrap();
        Activation::Sigmoid.apply(&mut m);
        assert_eq!(m.row(0), &[0.5, 0.5]);
    }
}
