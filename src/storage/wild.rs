use std::sync::atomic::{AtomicU64, Ordering};

use log::trace;
use parking_lot::Mutex;

use super::{Store, store::check_len};
use crate::{Polynomial, Result, optimization::Optimizer};

/// A parameter store that lets readers race with the writer.
///
/// Updates are serialized by a single lock, reads take no lock at all. Every
/// parameter is kept as the bit pattern of an `f64` inside an `AtomicU64`, so a
/// single parameter is always read whole, but a read of the full vector may mix
/// values from before and after a concurrent update. Gradients computed from such
/// a snapshot are still applied; convergence relies on tolerating that noise.
pub struct WildStore<O: Optimizer> {
    params: Box<[AtomicU64]>,
    update: Mutex<Update<O>>,
}

struct Update<O> {
    optimizer: O,
    scratch: Box<[f64]>,
}

impl<O: Optimizer> WildStore<O> {
    /// Creates a new `WildStore` parameter store.
    ///
    /// # Arguments
    /// * `initial` - The initial state of the model.
    /// * `optimizer` - The optimization algorithm, only ever run under the update lock.
    ///
    /// # Returns
    /// A new `WildStore` instance.
    pub fn new(initial: Polynomial<f64>, optimizer: O) -> Self {
        let params: Box<[AtomicU64]> = initial
            .coeffs()
            .iter()
            .map(|p| AtomicU64::new(p.to_bits()))
            .collect();

        Self {
            update: Mutex::new(Update {
                optimizer,
                scratch: vec![0.; params.len()].into_boxed_slice(),
            }),
            params,
        }
    }
}

impl<O: Optimizer> Store for WildStore<O> {
    fn len(&self) -> usize {
        self.params.len()
    }

    fn pull_params(&self, out: &mut [f64]) -> Result<()> {
        check_len("output buffer", out.len(), self.params.len())?;

        for (o, p) in out.iter_mut().zip(&self.params) {
            *o = f64::from_bits(p.load(Ordering::Relaxed));
        }

        Ok(())
    }

    fn update_params(&self, grad: &[f64]) -> Result<()> {
        check_len("gradient", grad.len(), self.params.len())?;

        let mut update = self.update.lock();
        let Update { optimizer, scratch } = &mut *update;

        // Writers are serialized, nothing else can store while we hold the lock.
        for (s, p) in scratch.iter_mut().zip(&self.params) {
            *s = f64::from_bits(p.load(Ordering::Relaxed));
        }

        optimizer.update_params(grad, scratch)?;

        for (s, p) in scratch.iter().zip(&self.params) {
            p.store(s.to_bits(), Ordering::Relaxed);
        }

        trace!("applied update to {} parameters", scratch.len());
        Ok(())
    }
}
