use std::time::Duration;

/// Counters a single worker collects during one epoch.
#[derive(Debug, Default, Clone)]
pub struct WorkerMetrics {
    pub compute_time: Duration,
    pub update_time: Duration,

    pub samples: usize,
    pub loss: f64,
}

impl WorkerMetrics {
    #[inline]
    pub fn add_sample(&mut self, loss: f64) {
        self.samples += 1;
        self.loss += loss;
    }

    /// Folds another worker's counters into these.
    pub fn merge(&mut self, other: &WorkerMetrics) {
        self.compute_time += other.compute_time;
        self.update_time += other.update_time;
        self.samples += other.samples;
        self.loss += other.loss;
    }
}

/// The outcome of a single pass over the dataset.
#[derive(Debug, Clone)]
pub struct EpochReport {
    pub epoch: usize,
    pub samples: usize,
    pub mean_loss: f64,
    pub elapsed: Duration,
}

impl EpochReport {
    pub(super) fn new(epoch: usize, metrics: &WorkerMetrics, elapsed: Duration) -> Self {
        let mean_loss = if metrics.samples == 0 {
            0.
        } else {
            metrics.loss / metrics.samples as f64
        };

        Self {
            epoch,
            samples: metrics.samples,
            mean_loss,
            elapsed,
        }
    }
}

/// The trained parameters together with the per epoch history.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub params: Vec<f64>,
    pub epochs: Vec<EpochReport>,
}

impl TrainingReport {
    /// Returns the mean loss of the last epoch, if any epoch ran.
    pub fn final_loss(&self) -> Option<f64> {
        self.epochs.last().map(|e| e.mean_loss)
    }
}
