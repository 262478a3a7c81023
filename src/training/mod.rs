mod metrics;
mod sequential;
mod trainer;
mod worker;

pub use metrics::{EpochReport, TrainingReport, WorkerMetrics};
pub use sequential::SequentialTrainer;
pub use trainer::Trainer;
pub use worker::Worker;
