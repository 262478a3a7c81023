use crate::{Result, TrainErr};

/// Defines the strategy for updating model parameters based on a gradient.
pub trait Optimizer: Send {
    /// Updates the provided slice of parameters using the gradient.
    ///
    /// # Arguments
    /// * `grad` - The gradient of the loss with respect to `params`.
    /// * `params` - The parameters to update.
    ///
    /// # Returns
    /// An error if there's a mismatch in the sizes of `grad` and `params`.
    fn update_params(&mut self, grad: &[f64], params: &mut [f64]) -> Result<()>;
}

impl<O: Optimizer + ?Sized> Optimizer for Box<O> {
    fn update_params(&mut self, grad: &[f64], params: &mut [f64]) -> Result<()> {
        (**self).update_params(grad, params)
    }
}

pub(super) fn check_sizes(grad: &[f64], params: &[f64]) -> Result<()> {
    if grad.len() != params.len() {
        return Err(TrainErr::SizeMismatch {
            a: "gradient",
            b: "parameters",
            got: grad.len(),
            expected: params.len(),
        });
    }

    Ok(())
}
