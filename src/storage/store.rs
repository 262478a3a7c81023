use crate::{Polynomial, Result, TrainErr};

/// The single, shared instance of the model's parameters during a training run.
///
/// Implementations guarantee that at most one thread is inside `update_params` at
/// any instant. What `pull_params` observes while an update is running depends on
/// the implementation.
pub trait Store: Send + Sync {
    /// Returns the amount of parameters in the storage.
    fn len(&self) -> usize;

    /// Copies the current parameters into `out`.
    ///
    /// # Returns
    /// A `SizeMismatch` error if `out` isn't the same size as the storage.
    fn pull_params(&self, out: &mut [f64]) -> Result<()>;

    /// Applies `grad` to the parameters through the store's optimizer.
    ///
    /// # Returns
    /// A `SizeMismatch` error if `grad` isn't the same size as the storage.
    fn update_params(&self, grad: &[f64]) -> Result<()>;

    /// Returns an independent copy of the current parameters as a model.
    fn snapshot(&self) -> Result<Polynomial<f64>> {
        let mut params = vec![0.; self.len()];
        self.pull_params(&mut params)?;
        Polynomial::new(params)
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn pull_params(&self, out: &mut [f64]) -> Result<()> {
        (**self).pull_params(out)
    }

    fn update_params(&self, grad: &[f64]) -> Result<()> {
        (**self).update_params(grad)
    }
}

pub(super) fn check_len(what: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(TrainErr::SizeMismatch {
            a: what,
            b: "store",
            got,
            expected,
        });
    }

    Ok(())
}
