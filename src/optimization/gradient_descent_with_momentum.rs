use super::{Optimizer, optimizer::check_sizes};
use crate::Result;

/// Gradient descent that keeps a running velocity per coefficient.
///
/// `v = mu * v + g` then `p -= lr * v`. The velocity lives with the optimizer, so
/// in a parallel run it is only touched under the store's update lock.
#[derive(Debug, Clone)]
pub struct GradientDescentWithMomentum {
    learning_rate: f64,
    momentum: f64,
    velocity: Vec<f64>,
}

impl GradientDescentWithMomentum {
    /// Creates a new `GradientDescentWithMomentum` optimizer.
    ///
    /// # Arguments
    /// * `len` - The amount of coefficients of the trained model.
    /// * `learning_rate` - The step size.
    /// * `momentum` - The fraction of the previous velocity kept on every update.
    ///
    /// # Returns
    /// A new `GradientDescentWithMomentum` instance.
    pub fn new(len: usize, learning_rate: f64, momentum: f64) -> Self {
        Self {
            learning_rate,
            momentum,
            velocity: vec![0.; len],
        }
    }
}

impl Optimizer for GradientDescentWithMomentum {
    fn update_params(&mut self, grad: &[f64], params: &mut [f64]) -> Result<()> {
        check_sizes(grad, params)?;
        check_sizes(&self.velocity, params)?;

        for ((v, &g), p) in self.velocity.iter_mut().zip(grad).zip(params) {
            *v = self.momentum * *v + g;
            *p -= self.learning_rate * *v;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velocity_carries_over() {
        let mut optimizer = GradientDescentWithMomentum::new(1, 0.5, 0.5);
        let mut params = [0.];

        optimizer.update_params(&[2.], &mut params).unwrap();
        assert_eq!(params, [-1.]);

        // v = 0.5 * 2 + 2 = 3
        optimizer.update_params(&[2.], &mut params).unwrap();
        assert_eq!(params, [-2.5]);
    }

    #[test]
    fn zero_momentum_is_plain_descent() {
        let mut optimizer = GradientDescentWithMomentum::new(2, 0.25, 0.);
        let mut params = [1., 1.];

        optimizer.update_params(&[4., 4.], &mut params).unwrap();
        optimizer.update_params(&[4., 4.], &mut params).unwrap();
        assert_eq!(params, [-1., -1.]);
    }
}
