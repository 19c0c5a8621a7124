//! Batch gradient step.
//!
//! One step of softmax cross-entropy gradient descent:
//!
//! - `guesses = softmax(X_b * W)`
//! - `gradient = X_b^T * (guesses - Y_b) / B`
//! - `W' = W - lr * gradient`
//!
//! The step is a pure function of the current weights and one batch: it returns a new
//! weight matrix and never writes to `weights`. Every intermediate buffer is owned by the
//! call and dropped before it returns.

use crate::activation::Activation;
use crate::{Matrix, MatrixView};

/// Compute the weights that follow `weights` after one step on a batch.
///
/// Shape contract:
/// - `features` is `(B, D + 1)` with `B > 0`
/// - `labels` is `(B, K)`
/// - `weights` is `(D + 1, K)`
///
/// Panics on shape mismatch; the engine validates shapes before training starts.
pub fn gradient_step(
    weights: &Matrix,
    features: MatrixView<'_>,
    labels: MatrixView<'_>,
    learning_rate: f32,
) -> Matrix {
    assert_eq!(
        features.rows(),
        labels.rows(),
        "batch feature rows {} do not match label rows {}",
        features.rows(),
        labels.rows()
    );
    assert_eq!(
        features.cols(),
        weights.rows(),
        "batch feature cols {} do not match weight rows {}",
        features.cols(),
        weights.rows()
    );
    assert_eq!(
        labels.cols(),
        weights.cols(),
        "batch label cols {} do not match weight cols {}",
        labels.cols(),
        weights.cols()
    );
    assert!(features.rows() > 0, "batch must not be empty");

    let mut guesses = features.matmul(weights.view());
    Activation::Softmax.apply(&mut guesses);
    for (g, &y) in guesses.as_mut_slice().iter_mut().zip(labels.as_slice()) {
        *g -= y;
    }

    // The gradient buffer becomes the returned weights.
    let inv_b = 1.0 / features.rows() as f32;
    let mut next = features.t_matmul(guesses.view());
    for (g, &w) in next.as_mut_slice().iter_mut().zip(weights.as_slice()) {
        *g = w - learning_rate * (*g * inv_b);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(analytic: f32, numeric: f32, abs_tol: f32, rel_tol: f32) {
        let diff = (analytic - numeric).abs();
        let scale = analytic.abs().max(numeric.abs()).max(1.0);
        assert!(
            diff <= abs_tol || diff / scale <= rel_tol,
            "analytic={analytic} numeric={numeric} diff={diff}"
        );
    }

    /// Mean softmax cross-entropy over the batch.
    fn softmax_loss(weights: &Matrix, features: &Matrix, labels: &Matrix) -> f32 {
        let mut guesses = features.matmul(weights);
        Activation::Softmax.apply(&mut guesses);
        let mut total = 0.0_f32;
        for i in 0..guesses.rows() {
            for (g, y) in guesses.row(i).iter().zip(labels.row(i)) {
                total -= y * g.ln();
            }
        }
        total / guesses.rows() as f32
    }

    fn batch() -> (Matrix, Matrix) {
        let features = Matrix::from_flat(
            vec![1.0, 0.5, -0.2, 1.0, -1.0, 0.3, 1.0, 0.1, 0.9],
            3,
            3,
        )
        .unwrap();
        let labels =
            Matrix::from_flat(vec![1.0, 0.0, 0.0, 1.0, 0.0, 1.0], 3, 2).unwrap();
        (features, labels)
    }

    #[test]
    fn step_follows_numeric_gradient_of_softmax_loss() {
        let (features, labels) = batch();
        let weights =
            Matrix::from_flat(vec![0.1, -0.1, 0.2, 0.0, -0.3, 0.4], 3, 2).unwrap();

        // With lr = 1, (W - W') is exactly the analytic gradient.
        let next = gradient_step(&weights, features.view(), labels.view(), 1.0);

        let eps = 1e-3_f32;
        for p in 0..weights.as_slice().len() {
            let mut plus = weights.clone();
            plus.as_mut_slice()[p] += eps;
            let mut minus = weights.clone();
            minus.as_mut_slice()[p] -= eps;

            let numeric = (softmax_loss(&plus, &features, &labels)
                - softmax_loss(&minus, &features, &labels))
                / (2.0 * eps);
            let analytic = weights.as_slice()[p] - next.as_slice()[p];
            assert_close(analytic, numeric, 1e-3, 1e-2);
        }
    }

    #[test]
    fn step_does_not_touch_input_weights() {
        let (features, labels) = batch();
        let weights = Matrix::zeros(3, 2);
        let snapshot = weights.clone();
        let next = gradient_step(&weights, features.view(), labels.view(), 0.5);
        assert_eq!(weights, snapshot);
        assert_eq!(next.shape(), weights.shape());
        assert_ne!(next, weights);
    }

    #[test]
    fn first_step_from_zero_weights_matches_closed_form() {
        // Zero weights give uniform guesses 1/K, so the bias row of the gradient is
        // mean(1/K - y) per class.
        let (features, labels) = batch();
        let next = gradient_step(&Matrix::zeros(3, 2), features.view(), labels.view(), 1.0);
        // class 0: (0.5 - 1 + 0.5 - 0 + 0.5 - 0) / 3 = 1/6, W' = -1/6
        assert!((next.get(0, 0) + 1.0 / 6.0).abs() < 1e-6);
        assert!((next.get(0, 1) - 1.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic]
    fn panics_on_label_width_mismatch() {
        let (features, _) = batch();
        let labels = Matrix::zeros(3, 3);
        let _ = gradient_step(&Matrix::zeros(3, 2), features.view(), labels.view(), 0.1);
    }
}
