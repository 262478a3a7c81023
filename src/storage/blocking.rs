use parking_lot::{Mutex, RwLock};

use super::{Store, store::check_len};
use crate::{Polynomial, Result, optimization::Optimizer};

/// A parameter store whose snapshots are always consistent across every parameter.
///
/// Readers share a read lock, an update holds the write lock while the optimizer runs.
pub struct BlockingStore<O: Optimizer> {
    params: RwLock<Box<[f64]>>,
    optimizer: Mutex<O>,
}

impl<O: Optimizer> BlockingStore<O> {
    /// Creates a new `BlockingStore` parameter store.
    ///
    /// # Arguments
    /// * `initial` - The initial state of the model.
    /// * `optimizer` - The optimization algorithm.
    ///
    /// # Returns
    /// A new `BlockingStore` instance.
    pub fn new(initial: Polynomial<f64>, optimizer: O) -> Self {
        Self {
            params: RwLock::new(initial.into_coeffs().into_boxed_slice()),
            optimizer: Mutex::new(optimizer),
        }
    }
}

impl<O: Optimizer> Store for BlockingStore<O> {
    fn len(&self) -> usize {
        self.params.read().len()
    }

    fn pull_params(&self, out: &mut [f64]) -> Result<()> {
        let params = self.params.read();
        check_len("output buffer", out.len(), params.len())?;

        out.copy_from_slice(&params);
        Ok(())
    }

    fn update_params(&self, grad: &[f64]) -> Result<()> {
        let mut optimizer = self.optimizer.lock();
        let mut params = self.params.write();
        check_len("gradient", grad.len(), params.len())?;

        optimizer.update_params(grad, &mut params)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::optimization::GradientDescent;

    fn create_test_store(params: Vec<f64>) -> BlockingStore<GradientDescent> {
        let initial = Polynomial::new(params).unwrap();
        BlockingStore::new(initial, GradientDescent::new(1.))
    }

    #[test]
    fn update_and_pull() {
        let store = create_test_store(vec![1., 1.]);
        store.update_params(&[0.5, -0.5]).unwrap();

        let mut out = [0.; 2];
        store.pull_params(&mut out).unwrap();
        assert_eq!(out, [0.5, 1.5]);
    }

    #[test]
    fn size_mismatch() {
        let store = create_test_store(vec![1., 1.]);

        assert!(store.update_params(&[0.5]).is_err());
        assert!(store.pull_params(&mut [0.; 3]).is_err());
    }

    #[test]
    fn snapshots_never_mix_updates() {
        const PARAMS: usize = 64;

        let store = create_test_store(vec![0.; PARAMS]);

        thread::scope(|s| {
            s.spawn(|| {
                for _ in 0..200 {
                    store.update_params(&[-1.; PARAMS]).unwrap();
                }
            });

            s.spawn(|| {
                let mut out = [0.; PARAMS];
                for _ in 0..200 {
                    store.pull_params(&mut out).unwrap();
                    assert!(out.iter().all(|&p| p == out[0]));
                }
            });
        });
    }
}
