//! Multinomial (softmax) logistic regression.
//!
//! `rust-logreg` trains a linear classifier on fixed-size feature vectors against one-hot
//! labels with mini-batch gradient descent and an adaptive learning rate, then scores it
//! on held-out data.
//!
//! # Pipeline
//!
//! - [`Standardizer`]: per-column mean/variance fitted once on the training set; every
//!   feature matrix the engine sees (training or test) is normalized with those
//!   statistics and gets a leading bias column of 1s.
//! - [`optim::gradient_step`]: one softmax cross-entropy step on a contiguous batch. Pure:
//!   it returns new weights.
//! - [`LogisticRegression::train`]: `iterations` epochs over `len / batch_size` batches
//!   (the remainder is never visited, see [`BatchPlan`]). After each epoch the cost is
//!   recorded into the [`CostHistory`] and the [`LrSchedule`] picks the next rate.
//! - [`LogisticRegression::predict`] / [`LogisticRegression::test`]: argmax class
//!   predictions and accuracy.
//!
//! # Panics vs `Result`
//!
//! - Low-level kernels ([`optim::gradient_step`], [`cost::sigmoid_cross_entropy`],
//!   [`Matrix::matmul`]) treat shape mismatches as programmer error and panic via
//!   `assert!`.
//! - The engine API validates shapes and configuration and returns [`Result`].
//!
//! # Data layout
//!
//! - Scalars are `f32`.
//! - Matrices are row-major. Weights have shape `(D + 1, K)`; row 0 is the bias row.
//!
//! # Quick start
//!
//! ```rust
//! use rust_logreg::{Features, Labels, LogisticRegression, RegressionConfig};
//!
//! # fn main() -> rust_logreg::Result<()> {
//! let xs = vec![
//!     vec![0.0, 0.1],
//!     vec![0.2, 0.0],
//!     vec![5.0, 5.1],
//!     vec![5.2, 4.9],
//! ];
//! let features = Features::from_rows(&xs)?;
//! let labels = Labels::one_hot(&[0, 0, 1, 1], 2)?;
//!
//! let mut model = LogisticRegression::new(
//!     &features,
//!     &labels,
//!     RegressionConfig {
//!         learning_rate: 0.5,
//!         iterations: 50,
//!         batch_size: 2,
//!         ..Default::default()
//!     },
//! )?;
//! model.train();
//!
//! assert_eq!(model.cost_history().len(), 50);
//! assert_eq!(model.test(&features, &labels)?, 1.0);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod cost;
pub mod data;
pub mod error;
pub mod history;
pub(crate) mod matmul;
pub mod matrix;
pub mod metrics;
pub mod model;
pub mod optim;
pub mod schedule;
pub mod standardize;
pub mod train;

pub use activation::Activation;
pub use data::{Features, Labels};
pub use error::{Error, Result};
pub use history::CostHistory;
pub use matrix::{Matrix, MatrixView};
pub use model::LogisticRegression;
pub use schedule::{LrSchedule, RateFn};
pub use standardize::{Moments, Standardizer};
pub use train::{BatchPlan, RegressionConfig, TrainReport};
