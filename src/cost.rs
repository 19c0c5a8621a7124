//! Cost recording.
//!
//! The recorded cost is the vectorized sigmoid cross-entropy
//!
//! `C = -(1/N) * (Y^T * ln(G + eps) + (1 - Y)^T * ln(1 - G + eps))[0][0]`
//!
//! with `G = sigmoid(X * W)`. The bracketed product is `(K, K)` but only its top-left cell
//! is read, and that cell depends only on column 0 of `Y` and `G`, so only that column is
//! scored here.
//!
//! The cost deliberately uses a sigmoid while the gradient step uses a softmax. The
//! learning-rate schedule is driven by these values, so changing the link here would
//! change training.

use crate::activation::sigmoid;
use crate::{Matrix, MatrixView};

/// Additive guard inside both logarithms.
pub const LOG_EPSILON: f32 = 1e-7;

/// Sigmoid cross-entropy cost of `weights` over the whole standardized training set.
///
/// Shape contract:
/// - `features` is `(N, D + 1)`, `labels` is `(N, K)`, `weights` is `(D + 1, K)`
/// - `N > 0`
pub fn sigmoid_cross_entropy(
    features: MatrixView<'_>,
    labels: MatrixView<'_>,
    weights: &Matrix,
) -> f32 {
    assert_eq!(
        features.rows(),
        labels.rows(),
        "feature rows {} do not match label rows {}",
        features.rows(),
        labels.rows()
    );
    assert_eq!(
        features.cols(),
        weights.rows(),
        "feature cols {} do not match weight rows {}",
        features.cols(),
        weights.rows()
    );
    assert!(features.rows() > 0, "cost requires at least 1 example");

    let k = weights.cols();
    let w = weights.as_slice();

    let mut term_one = 0.0_f64;
    let mut term_two = 0.0_f64;
    for i in 0..features.rows() {
        let mut z = 0.0_f32;
        for (j, &x) in features.row(i).iter().enumerate() {
            z = x.mul_add(w[j * k], z);
        }
        let guess = sigmoid(z);
        let actual = labels.row(i)[0];

        term_one += f64::from(actual * (guess + LOG_EPSILON).ln());
        term_two += f64::from((1.0 - actual) * (1.0 - guess + LOG_EPSILON).ln());
    }

    (-(term_one + term_two) / features.rows() as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Activation;

    /// Full `(K, K)` matrix formulation, for comparison.
    fn cost_matrix(features: &Matrix, labels: &Matrix, weights: &Matrix) -> Matrix {
        let mut guesses = features.matmul(weights);
        Activation::Sigmoid.apply(&mut guesses);

        let log_g: Vec<f32> = guesses
            .as_slice()
            .iter()
            .map(|g| (g + LOG_EPSILON).ln())
            .collect();
        let log_1mg: Vec<f32> = guesses
            .as_slice()
            .iter()
            .map(|g| (1.0 - g + LOG_EPSILON).ln())
            .collect();
        let inv_y: Vec<f32> = labels.as_slice().iter().map(|y| 1.0 - y).collect();

        let (n, k) = guesses.shape();
        let log_g = Matrix::from_flat(log_g, n, k).unwrap();
        let log_1mg = Matrix::from_flat(log_1mg, n, k).unwrap();
        let inv_y = Matrix::from_flat(inv_y, n, k).unwrap();

        let one = labels.view().t_matmul(log_g.view());
        let two = inv_y.view().t_matmul(log_1mg.view());
        let values = one
            .as_slice()
            .iter()
            .zip(two.as_slice())
            .map(|(a, b)| -(a + b) / n as f32)
            .collect();
        Matrix::from_flat(values, k, k).unwrap()
    }

    fn fixture() -> (Matrix, Matrix, Matrix) {
        let features = Matrix::from_flat(
            vec![1.0, 0.5, -1.0, 1.0, -0.3, 0.8, 1.0, 1.2, 0.1],
            3,
            3,
        )
        .unwrap();
        let labels =
            Matrix::from_flat(vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0], 3, 3).unwrap();
        let weights = Matrix::from_flat(
            vec![0.1, -0.2, 0.3, 0.4, 0.0, -0.1, -0.5, 0.2, 0.6],
            3,
            3,
        )
        .unwrap();
        (features, labels, weights)
    }

    #[test]
    fn matches_top_left_cell_of_matrix_formulation() {
        let (features, labels, weights) = fixture();
        let expected = cost_matrix(&features, &labels, &weights).get(0, 0);
        let got = sigmoid_cross_entropy(features.view(), labels.view(), &weights);
        assert!((got - expected).abs() < 1e-5, "got={got} expected={expected}");
    }

    #[test]
    fn zero_weights_cost_is_ln_2() {
        let (features, labels, _) = fixture();
        let weights = Matrix::zeros(3, 3);
        let got = sigmoid_cross_entropy(features.view(), labels.view(), &weights);
        // Every guess is 0.5, so each example contributes -ln(0.5 + eps).
        assert!((got - std::f32::consts::LN_2).abs() < 1e-5);
    }

    #[test]
    fn saturated_guesses_stay_finite() {
        let features = Matrix::from_flat(vec![1.0, 1.0], 2, 1).unwrap();
        let labels = Matrix::from_flat(vec![1.0, 0.0, 0.0, 1.0], 2, 2).unwrap();
        let weights = Matrix::from_flat(vec![1000.0, -1000.0], 1, 2).unwrap();
        let got = sigmoid_cross_entropy(features.view(), labels.view(), &weights);
        assert!(got.is_finite());
        assert!(got > 0.0);
    }
}
