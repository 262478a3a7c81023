//! Hogwild-style parallel training of a polynomial model.
//!
//! A [`Trainer`](training::Trainer) pushes the whole [`Dataset`] onto a shared
//! [`WorkQueue`] every epoch and spawns a pool of [`Worker`](training::Worker)s.
//! Each worker copies the shared model without locking, differentiates the squared
//! error of one sample on its own recording and applies the gradient to the shared
//! model under a single lock. The pool is joined before the next epoch starts.

mod builder;
pub mod config;
mod dataset;
mod error;
pub mod initialization;
mod model;
pub mod optimization;
mod queue;
pub mod storage;
pub mod training;

use std::num::NonZeroUsize;

pub use builder::TrainerBuilder;
pub use config::TrainingConfig;
pub use dataset::{Dataset, Sample};
pub use error::{Result, TrainErr};
pub use model::Polynomial;
pub use queue::WorkQueue;

use optimization::GradientDescent;
use storage::WildStore;
use training::Trainer;

/// Trains `initial` with plain gradient descent on `workers` threads for `epochs` epochs.
///
/// # Arguments
/// * `initial` - The initial state of the model.
/// * `dataset` - The samples pushed to the queue every epoch.
/// * `epochs` - The amount of full passes over `dataset`.
/// * `workers` - The amount of worker threads spawned per epoch.
/// * `learning_rate` - The gradient descent step size.
///
/// # Returns
/// The trained model.
///
/// # Errors
/// `NoWorkers` if `workers` is zero, otherwise any error raised while training.
pub fn train(
    initial: Polynomial<f64>,
    dataset: &Dataset,
    epochs: usize,
    workers: usize,
    learning_rate: f64,
) -> Result<Polynomial<f64>> {
    let workers = NonZeroUsize::new(workers).ok_or(TrainErr::NoWorkers)?;
    let store = WildStore::new(initial, GradientDescent::new(learning_rate));

    let report = Trainer::new(store, workers).run(dataset, epochs)?;
    Polynomial::new(report.params)
}
