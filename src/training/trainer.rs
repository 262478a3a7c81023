use std::{io, num::NonZeroUsize, thread, time::Instant};

use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};

use super::{EpochReport, TrainingReport, Worker, WorkerMetrics};
use crate::{Dataset, Result, Sample, TrainErr, WorkQueue, storage::Store};

/// Drives the epochs of a training run.
///
/// Every epoch fills the queue with the whole dataset, spawns a fresh pool of
/// workers and joins all of them before the next epoch starts. The join is the
/// only barrier between epochs.
pub struct Trainer<S: Store> {
    store: S,
    queue: WorkQueue<Sample>,
    workers: NonZeroUsize,
    rng: Option<StdRng>,
}

impl<S: Store> Trainer<S> {
    /// Creates a new `Trainer`.
    ///
    /// # Arguments
    /// * `store` - The shared model, owned by the trainer for the whole run.
    /// * `workers` - The amount of worker threads spawned per epoch.
    ///
    /// # Returns
    /// A new `Trainer` instance.
    pub fn new(store: S, workers: NonZeroUsize) -> Self {
        Self {
            store,
            queue: WorkQueue::new(),
            workers,
            rng: None,
        }
    }

    /// Enqueues the dataset in a different random order every epoch.
    ///
    /// # Arguments
    /// * `seed` - Seed of the shuffling random number generator.
    pub fn with_shuffle(mut self, seed: u64) -> Self {
        self.rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    pub fn workers(&self) -> usize {
        self.workers.get()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn queue(&self) -> &WorkQueue<Sample> {
        &self.queue
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Trains the shared model for `epochs` passes over `dataset`.
    ///
    /// # Returns
    /// The final parameters and a report per epoch, or the first error raised by an epoch.
    pub fn run(&mut self, dataset: &Dataset, epochs: usize) -> Result<TrainingReport> {
        if dataset.is_empty() {
            warn!("training on an empty dataset, the model won't change");
        }

        info!(
            workers = self.workers.get(),
            epochs = epochs,
            samples = dataset.len();
            "starting training"
        );

        let progress_every = (epochs / 10).max(1);
        let mut reports = Vec::with_capacity(epochs);

        for epoch in 0..epochs {
            let report = self.run_epoch(epoch, dataset)?;

            if (epoch + 1) % progress_every == 0 {
                info!(
                    "completed {}/{epochs} epochs, mean loss {:.6e}",
                    epoch + 1,
                    report.mean_loss
                );
            }

            reports.push(report);
        }

        let mut params = vec![0.; self.store.len()];
        self.store.pull_params(&mut params)?;
        info!("finished training: {params:?}");

        Ok(TrainingReport {
            params,
            epochs: reports,
        })
    }

    /// Runs a single epoch: enqueue, spawn, join.
    ///
    /// The queue is empty once this returns, whether the epoch succeeded or not.
    pub fn run_epoch(&mut self, epoch: usize, dataset: &Dataset) -> Result<EpochReport> {
        let start = Instant::now();

        match &mut self.rng {
            Some(rng) => {
                let mut shuffled = dataset.clone();
                shuffled.shuffle(rng);
                self.queue.extend(shuffled.iter().copied());
            }
            None => self.queue.extend(dataset.iter().copied()),
        }

        let metrics = self.spawn_workers(epoch).inspect_err(|_| self.queue.clear())?;
        let report = EpochReport::new(epoch, &metrics, start.elapsed());

        debug!(
            epoch = epoch,
            samples = report.samples,
            mean_loss = report.mean_loss;
            "epoch finished"
        );

        Ok(report)
    }

    fn spawn_workers(&self, epoch: usize) -> Result<WorkerMetrics> {
        let Self {
            store,
            queue,
            workers,
            ..
        } = self;

        thread::scope(|s| {
            let handles = (0..workers.get())
                .map(|worker_id| {
                    let worker = Worker::new(worker_id, epoch, store, queue);

                    thread::Builder::new()
                        .name(format!("worker-{worker_id}"))
                        .spawn_scoped(s, move || worker.run())
                })
                .collect::<io::Result<Vec<_>>>()?;

            let mut total = WorkerMetrics::default();
            let mut failure = None;

            // Every handle is joined, even after a failure, so no worker outlives its epoch.
            for (worker_id, handle) in handles.into_iter().enumerate() {
                match handle.join() {
                    Ok(Ok(metrics)) => total.merge(&metrics),
                    Ok(Err(e)) => {
                        warn!("worker {worker_id} failed during epoch {epoch}: {e}");
                        if failure.is_none() {
                            failure = Some(e);
                        }
                    }
                    Err(_) => {
                        warn!("worker {worker_id} panicked during epoch {epoch}");
                        if failure.is_none() {
                            failure = Some(TrainErr::WorkerPanicked { worker_id, epoch });
                        }
                    }
                }
            }

            match failure {
                Some(e) => Err(e),
                None => Ok(total),
            }
        })
    }
}
