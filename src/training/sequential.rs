use std::time::Instant;

use autodiff::Stack;
use log::{debug, info};

use super::{EpochReport, TrainingReport, WorkerMetrics, worker::backprop};
use crate::{Dataset, Polynomial, Result, optimization::Optimizer};

/// Single threaded training with the same update rule as the parallel `Trainer`.
///
/// Used as a baseline, its result is what the parallel run is compared against.
pub struct SequentialTrainer<O: Optimizer> {
    model: Polynomial<f64>,
    optimizer: O,
}

impl<O: Optimizer> SequentialTrainer<O> {
    /// Creates a new `SequentialTrainer`.
    ///
    /// # Arguments
    /// * `model` - The initial state of the model.
    /// * `optimizer` - The optimization algorithm.
    ///
    /// # Returns
    /// A new `SequentialTrainer` instance.
    pub fn new(model: Polynomial<f64>, optimizer: O) -> Self {
        Self { model, optimizer }
    }

    pub fn model(&self) -> &Polynomial<f64> {
        &self.model
    }

    pub fn into_model(self) -> Polynomial<f64> {
        self.model
    }

    /// Trains the model for `epochs` passes over `dataset`, in order, one sample at a time.
    pub fn run(&mut self, dataset: &Dataset, epochs: usize) -> Result<TrainingReport> {
        info!(epochs = epochs, samples = dataset.len(); "starting sequential training");

        let mut stack = Stack::new();
        let mut grad = vec![0.; self.model.len()];
        let mut reports = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            let start = Instant::now();
            let mut metrics = WorkerMetrics::default();

            for &sample in dataset.iter() {
                stack.new_recording();
                let loss = backprop(&stack, &self.model, sample, &mut grad)?;

                self.optimizer
                    .update_params(&grad, self.model.coeffs_mut())?;
                metrics.add_sample(loss);
            }

            metrics.compute_time = start.elapsed();
            let report = EpochReport::new(epoch, &metrics, metrics.compute_time);
            debug!(epoch = epoch, loss = metrics.loss; "epoch finished");
            reports.push(report);
        }

        info!("finished sequential training: {:?}", self.model.coeffs());

        Ok(TrainingReport {
            params: self.model.coeffs().to_vec(),
            epochs: reports,
        })
    }
}
