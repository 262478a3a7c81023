use std::time::Instant;

use autodiff::Stack;
use log::{debug, trace};

use super::WorkerMetrics;
use crate::{Polynomial, Result, Sample, WorkQueue, storage::Store};

/// One training thread's loop over the shared queue.
///
/// Per item the worker:
/// 1. Copies the shared model without taking the update lock.
/// 2. Starts a new recording on its own `Stack`.
/// 3. Pops a sample, leaving the loop once the queue is empty.
/// 4. Evaluates the copy, records the squared error and runs the backward pass.
/// 5. Hands the gradient to the store, which applies it under its lock.
pub struct Worker<'a, S: Store> {
    worker_id: usize,
    epoch: usize,
    store: &'a S,
    queue: &'a WorkQueue<Sample>,
}

impl<'a, S: Store> Worker<'a, S> {
    /// Creates a new `Worker`.
    ///
    /// # Arguments
    /// * `worker_id` - Identifier used for observability.
    /// * `epoch` - The epoch this worker belongs to.
    /// * `store` - The shared model.
    /// * `queue` - The queue of samples of the current epoch.
    ///
    /// # Returns
    /// A new `Worker` instance.
    pub fn new(worker_id: usize, epoch: usize, store: &'a S, queue: &'a WorkQueue<Sample>) -> Self {
        Self {
            worker_id,
            epoch,
            store,
            queue,
        }
    }

    /// Runs the worker until the queue is drained.
    ///
    /// The recording context is created here, so it lives and dies on the calling thread.
    ///
    /// # Returns
    /// The worker's metrics, or the first error raised by the store.
    pub fn run(self) -> Result<WorkerMetrics> {
        let Self {
            worker_id,
            epoch,
            store,
            queue,
        } = self;

        let mut stack = Stack::new();
        let mut grad = vec![0.; store.len()];
        let mut metrics = WorkerMetrics::default();

        loop {
            // May interleave with another worker's update, see `WildStore`.
            let local_model = store.snapshot()?;
            stack.new_recording();

            let Some(sample) = queue.try_pop() else {
                break;
            };

            let start = Instant::now();
            let loss = backprop(&stack, &local_model, sample, &mut grad)?;
            metrics.compute_time += start.elapsed();

            let start = Instant::now();
            store.update_params(&grad)?;
            metrics.update_time += start.elapsed();

            metrics.add_sample(loss);
            trace!(worker_id = worker_id, x = sample.x, loss = loss; "applied sample");
        }

        debug!(
            worker_id = worker_id,
            epoch = epoch,
            samples = metrics.samples;
            "worker drained the queue"
        );

        Ok(metrics)
    }
}

/// Records `(model(x) - y)^2` on `stack`, differentiates it and writes the
/// gradient with respect to every coefficient into `grad`.
///
/// # Returns
/// The value of the loss.
pub(super) fn backprop(
    stack: &Stack,
    model: &Polynomial<f64>,
    sample: Sample,
    grad: &mut [f64],
) -> Result<f64> {
    let params = model.attach(stack);

    let z = params.evaluate(sample.x);
    let diff = z - sample.y;
    let loss = diff * diff;

    loss.set_gradient(1.);
    stack.compute_adjoint();
    params.gradients(grad)?;

    Ok(loss.value())
}
