use log::{debug, info, trace, warn};

use crate::optim::gradient_step;
use crate::{Error, LogisticRegression, LrSchedule, Result, cost};

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegressionConfig {
    /// Initial step size. The schedule updates the engine's copy after every epoch.
    pub learning_rate: f32,
    /// Number of epochs.
    pub iterations: usize,
    /// Examples per gradient step.
    pub batch_size: usize,
    /// Reserved; not used by training or prediction.
    pub decision_boundary: f32,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub lr_schedule: LrSchedule,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            iterations: 1000,
            batch_size: 10,
            decision_boundary: 0.5,
            lr_schedule: LrSchedule::default(),
        }
    }
}

impl RegressionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning_rate must be finite and > 0, got {}",
                self.learning_rate
            )));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be > 0".to_owned()));
        }
        self.lr_schedule.validate()
    }
}

/// How the training set is cut into batches.
///
/// Batches are contiguous and taken in order; the trailing `dropped_examples` rows
/// (`len % batch_size`) are never visited. A `batch_size` above `len` gives zero batches,
/// so epochs only record the cost and update the learning rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchPlan {
    pub batch_size: usize,
    pub batch_quantity: usize,
    pub effective_examples: usize,
    pub dropped_examples: usize,
}

impl BatchPlan {
    pub fn new(len: usize, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be > 0".to_owned()));
        }
        let batch_quantity = len / batch_size;
        let effective_examples = batch_quantity * batch_size;
        Ok(Self {
            batch_size,
            batch_quantity,
            effective_examples,
            dropped_examples: len - effective_examples,
        })
    }

    /// First row of batch `idx`.
    #[inline]
    pub fn start(&self, idx: usize) -> usize {
        idx * self.batch_size
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainReport {
    pub epochs: usize,
    pub final_cost: f32,
    pub final_learning_rate: f32,
    pub effective_examples: usize,
}

impl LogisticRegression {
    /// Run `iterations` epochs of mini-batch gradient descent.
    ///
    /// Each epoch steps through the batches in order, then records the cost over the whole
    /// training set and lets the schedule update the learning rate.
    pub fn train(&mut self) -> TrainReport {
        let plan = self.batch_plan();
        info!(
            examples = self.features.rows(),
            effective_examples = plan.effective_examples,
            batches = plan.batch_quantity,
            epochs = self.config.iterations,
            learning_rate = self.learning_rate;
            "training started"
        );

        let mut final_cost = f32::NAN;
        for epoch in 0..self.config.iterations {
            for batch in 0..plan.batch_quantity {
                trace!(epoch = epoch, batch = batch; "batch step");
                self.step(batch);
            }
            final_cost = self.record_cost();
            self.update_learning_rate();
            debug!(
                epoch = epoch,
                cost = final_cost,
                learning_rate = self.learning_rate;
                "epoch finished"
            );
        }

        info!(
            final_cost = final_cost,
            learning_rate = self.learning_rate;
            "training finished"
        );
        TrainReport {
            epochs: self.config.iterations,
            final_cost,
            final_learning_rate: self.learning_rate,
            effective_examples: plan.effective_examples,
        }
    }

    /// Replace the weights with the result of one gradient step on batch `idx`.
    ///
    /// Panics if `idx >= batch_quantity`.
    pub fn step(&mut self, idx: usize) {
        let plan = self.batch_plan();
        assert!(
            idx < plan.batch_quantity,
            "batch {idx} out of range for {} batches",
            plan.batch_quantity
        );
        let start = plan.start(idx);
        let features = self.features.row_range(start, plan.batch_size);
        let labels = self.labels.row_range(start, plan.batch_size);
        self.weights = gradient_step(&self.weights, features, labels, self.learning_rate);
    }

    /// Compute the cost of the current weights over the whole training set and prepend it
    /// to the cost history.
    pub fn record_cost(&mut self) -> f32 {
        let cost =
            cost::sigmoid_cross_entropy(self.features.view(), self.labels.view(), &self.weights);
        if !cost.is_finite() {
            warn!(cost = cost, epoch = self.cost_history.len(); "non-finite cost recorded");
        }
        self.cost_history.record(cost);
        cost
    }

    /// Let the configured schedule pick the learning rate for the next epoch.
    pub fn update_learning_rate(&mut self) {
        self.learning_rate = self
            .config
            .lr_schedule
            .next_rate(self.learning_rate, &self.cost_history);
    }
}
