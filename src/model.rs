use std::ops::{Add, Mul};

use autodiff::{Stack, Var};

use crate::{Result, TrainErr};

/// A polynomial model, `coeffs[i]` being the coefficient of `x^i`.
///
/// The scalar type is generic so the same model evaluates either plain `f64`
/// parameters or parameters registered on a recording (`Var`). Cloning it yields
/// an independent copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<T> {
    coeffs: Vec<T>,
}

impl<T> Polynomial<T> {
    /// Creates a new `Polynomial`.
    ///
    /// # Arguments
    /// * `coeffs` - The coefficients, lowest degree first.
    ///
    /// # Returns
    /// An `EmptyModel` error if `coeffs` is empty.
    pub fn new(coeffs: Vec<T>) -> Result<Self> {
        if coeffs.is_empty() {
            return Err(TrainErr::EmptyModel);
        }

        Ok(Self { coeffs })
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn coeffs(&self) -> &[T] {
        &self.coeffs
    }

    /// Mutable access to the coefficients, the amount of them can't change.
    pub fn coeffs_mut(&mut self) -> &mut [T] {
        &mut self.coeffs
    }

    pub fn into_coeffs(self) -> Vec<T> {
        self.coeffs
    }
}

impl<T> Polynomial<T>
where
    T: Copy + Add<Output = T> + Mul<f64, Output = T>,
{
    /// Evaluates the polynomial at `x` using Horner's rule.
    pub fn evaluate(&self, x: f64) -> T {
        let (&last, rest) = self
            .coeffs
            .split_last()
            .expect("a polynomial always holds at least one coefficient");

        rest.iter().rev().fold(last, |v, &c| v * x + c)
    }
}

impl Polynomial<f64> {
    /// Registers every coefficient as an independent input of `stack`'s current recording.
    ///
    /// # Arguments
    /// * `stack` - The recording context owned by the calling thread.
    ///
    /// # Returns
    /// A differentiable copy of this polynomial bound to `stack`.
    pub fn attach<'s>(&self, stack: &'s Stack) -> Polynomial<Var<'s>> {
        Polynomial {
            coeffs: self.coeffs.iter().map(|&c| stack.variable(c)).collect(),
        }
    }
}

impl Polynomial<Var<'_>> {
    /// Copies the gradient of every coefficient after a backward pass.
    ///
    /// # Arguments
    /// * `out` - Where to write `∂output/∂coeffs[i]`.
    ///
    /// # Returns
    /// A `SizeMismatch` error if `out` isn't as long as the polynomial.
    pub fn gradients(&self, out: &mut [f64]) -> Result<()> {
        if out.len() != self.coeffs.len() {
            return Err(TrainErr::SizeMismatch {
                a: "gradient buffer",
                b: "model",
                got: out.len(),
                expected: self.coeffs.len(),
            });
        }

        for (g, c) in out.iter_mut().zip(&self.coeffs) {
            *g = c.get_gradient();
        }

        Ok(())
    }
}
