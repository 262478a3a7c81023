use std::{
    collections::HashSet,
    num::NonZeroUsize,
    thread::{self, ThreadId},
};

use hogwild_trainer::{
    Dataset, Polynomial, Result,
    optimization::GradientDescent,
    storage::{Store, WildStore},
    training::Trainer,
};
use parking_lot::Mutex;

/// Remembers which thread applied every update.
struct RecordingStore {
    inner: WildStore<GradientDescent>,
    updates: Mutex<Vec<ThreadId>>,
}

impl RecordingStore {
    fn new(params: usize) -> Self {
        let initial = Polynomial::new(vec![0.; params]).unwrap();
        Self {
            inner: WildStore::new(initial, GradientDescent::new(1e-3)),
            updates: Mutex::new(Vec::new()),
        }
    }

    fn take_updates(&self) -> Vec<ThreadId> {
        std::mem::take(&mut *self.updates.lock())
    }
}

impl Store for RecordingStore {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn pull_params(&self, out: &mut [f64]) -> Result<()> {
        self.inner.pull_params(out)
    }

    fn update_params(&self, grad: &[f64]) -> Result<()> {
        self.inner.update_params(grad)?;
        self.updates.lock().push(thread::current().id());
        Ok(())
    }
}

fn dataset(n: usize) -> Dataset {
    (0..n).map(|i| (i as f64 / n as f64, 1.)).collect()
}

#[test]
fn every_epoch_finishes_before_the_next_one_starts() {
    const SAMPLES: usize = 2000;
    const EPOCHS: usize = 4;

    let dataset = dataset(SAMPLES);
    let mut trainer = Trainer::new(RecordingStore::new(3), NonZeroUsize::new(8).unwrap());

    let mut seen_threads = HashSet::new();

    for epoch in 0..EPOCHS {
        let report = trainer.run_epoch(epoch, &dataset).unwrap();
        let updates = trainer.store().take_updates();

        assert!(trainer.queue().is_empty());
        assert_eq!(report.samples, SAMPLES);
        assert_eq!(updates.len(), SAMPLES);

        // Workers never carry over from one epoch to the next.
        let threads: HashSet<_> = updates.into_iter().collect();
        assert!(threads.len() <= 8);
        assert!(seen_threads.is_disjoint(&threads));
        seen_threads.extend(threads);
    }

    // Nothing keeps running once the last epoch returned.
    thread::sleep(std::time::Duration::from_millis(20));
    assert!(trainer.store().take_updates().is_empty());
}

#[test]
fn training_report_covers_every_epoch() {
    let dataset = dataset(100);
    let mut trainer = Trainer::new(RecordingStore::new(2), NonZeroUsize::new(3).unwrap());

    let report = trainer.run(&dataset, 5).unwrap();

    assert_eq!(report.epochs.len(), 5);
    for (i, epoch) in report.epochs.iter().enumerate() {
        assert_eq!(epoch.epoch, i);
        assert_eq!(epoch.samples, 100);
    }
    assert_eq!(trainer.store().take_updates().len(), 500);
    assert_eq!(report.params, trainer.store().snapshot().unwrap().into_coeffs());
}
