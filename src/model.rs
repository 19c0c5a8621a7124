use crate::activation::Activation;
use crate::metrics::{accuracy, argmax_rows};
use crate::{
    BatchPlan, CostHistory, Error, Features, Labels, Matrix, RegressionConfig, Result,
    Standardizer,
};

/// Multinomial logistic regression over standardized, bias-augmented features.
///
/// The engine owns the standardized training set, the `(D + 1, K)` weight matrix, the
/// cost history and the current learning rate. Construction fits the standardizer on the
/// training features; prediction and scoring reuse those statistics.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    pub(crate) config: RegressionConfig,
    pub(crate) learning_rate: f32,
    pub(crate) standardizer: Standardizer,
    /// Standardized training features, `(N, D + 1)`.
    pub(crate) features: Matrix,
    /// One-hot training labels, `(N, K)`.
    pub(crate) labels: Matrix,
    pub(crate) weights: Matrix,
    pub(crate) cost_history: CostHistory,
    pub(crate) plan: BatchPlan,
}

impl LogisticRegression {
    /// Standardize the training set and set up zero-initialized weights.
    pub fn new(features: &Features, labels: &Labels, config: RegressionConfig) -> Result<Self> {
        config.validate()?;
        if labels.len() != features.len() {
            return Err(Error::ShapeMismatch {
                what: "label rows",
                got: labels.len(),
                expected: features.len(),
            });
        }
        let plan = BatchPlan::new(features.len(), config.batch_size)?;

        let mut standardizer = Standardizer::new();
        let design = standardizer.fit_apply(features)?;
        let weights = Matrix::zeros(design.cols(), labels.num_classes());

        Ok(Self {
            config,
            learning_rate: config.learning_rate,
            standardizer,
            features: design,
            labels: labels.as_matrix().clone(),
            weights,
            cost_history: CostHistory::with_capacity(config.iterations),
            plan,
        })
    }

    #[inline]
    pub fn config(&self) -> &RegressionConfig {
        &self.config
    }

    /// Learning rate for the next epoch.
    #[inline]
    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    /// Current `(D + 1, K)` weights; row 0 is the bias row.
    #[inline]
    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    #[inline]
    pub fn cost_history(&self) -> &CostHistory {
        &self.cost_history
    }

    #[inline]
    pub fn standardizer(&self) -> &Standardizer {
        &self.standardizer
    }

    /// The standardized, bias-augmented training matrix.
    #[inline]
    pub fn design_matrix(&self) -> &Matrix {
        &self.features
    }

    #[inline]
    pub fn batch_plan(&self) -> BatchPlan {
        self.plan
    }

    /// Raw feature dimension `D`.
    #[inline]
    pub fn num_features(&self) -> usize {
        self.weights.rows() - 1
    }

    #[inline]
    pub fn num_classes(&self) -> usize {
        self.weights.cols()
    }

    /// Class probabilities `softmax(standardize(X) * W)`, shape `(len, K)`.
    pub fn predict_proba(&self, observations: &Features) -> Result<Matrix> {
        let design = self.standardizer.apply(observations)?;
        let mut scores = design.matmul(&self.weights);
        Activation::Softmax.apply(&mut scores);
        Ok(scores)
    }

    /// Predicted class index for each row of `observations`.
    pub fn predict(&self, observations: &Features) -> Result<Vec<usize>> {
        let proba = self.predict_proba(observations)?;
        Ok(argmax_rows(proba.view()))
    }

    /// Fraction of correctly classified rows, in `[0, 1]`.
    pub fn test(&self, features: &Features, labels: &Labels) -> Result<f32> {
        if labels.len() != features.len() {
            return Err(Error::ShapeMismatch {
                what: "test label rows",
                got: labels.len(),
                expected: features.len(),
            });
        }
        if labels.num_classes() != self.num_classes() {
            return Err(Error::ShapeMismatch {
                what: "test label classes",
                got: labels.num_classes(),
                expected: self.num_classes(),
            });
        }

        let predictions = self.predict(features)?;
        accuracy(&predictions, &labels.classes())
    }
}
