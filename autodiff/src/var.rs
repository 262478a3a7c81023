use std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

use crate::Stack;

/// A differentiable `f64` recorded on a [`Stack`].
#[derive(Clone, Copy)]
pub struct Var<'s> {
    stack: &'s Stack,
    index: usize,
    value: f64,
}

impl<'s> Var<'s> {
    pub(crate) fn new(stack: &'s Stack, index: usize, value: f64) -> Self {
        Self {
            stack,
            index,
            value,
        }
    }

    /// Returns the numeric value computed in the forward pass.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Seeds the gradient of this value before running `Stack::compute_adjoint`.
    ///
    /// # Arguments
    /// * `seed` - The gradient of the final output with respect to this value.
    pub fn set_gradient(&self, seed: f64) {
        self.stack.set_adjoint(self.index, seed);
    }

    /// Returns the gradient propagated into this value by the last backward pass.
    pub fn get_gradient(&self) -> f64 {
        self.stack.adjoint(self.index)
    }

    fn unary(self, value: f64, partial: f64) -> Self {
        let index = self.stack.push_unary(self.index, partial);
        Self::new(self.stack, index, value)
    }

    fn binary(self, rhs: Self, value: f64, partials: (f64, f64)) -> Self {
        debug_assert!(
            std::ptr::eq(self.stack, rhs.stack),
            "operands recorded on different stacks"
        );

        let index = self
            .stack
            .push_binary((self.index, partials.0), (rhs.index, partials.1));

        Self::new(self.stack, index, value)
    }
}

impl fmt::Debug for Var<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Var")
            .field("index", &self.index)
            .field("value", &self.value)
            .finish()
    }
}

impl<'s> Add for Var<'s> {
    type Output = Var<'s>;

    fn add(self, rhs: Self) -> Self::Output {
        self.binary(rhs, self.value + rhs.value, (1., 1.))
    }
}

impl<'s> Sub for Var<'s> {
    type Output = Var<'s>;

    fn sub(self, rhs: Self) -> Self::Output {
        self.binary(rhs, self.value - rhs.value, (1., -1.))
    }
}

impl<'s> Mul for Var<'s> {
    type Output = Var<'s>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.binary(rhs, self.value * rhs.value, (rhs.value, self.value))
    }
}

impl<'s> Add<f64> for Var<'s> {
    type Output = Var<'s>;

    fn add(self, rhs: f64) -> Self::Output {
        self.unary(self.value + rhs, 1.)
    }
}

impl<'s> Sub<f64> for Var<'s> {
    type Output = Var<'s>;

    fn sub(self, rhs: f64) -> Self::Output {
        self.unary(self.value - rhs, 1.)
    }
}

impl<'s> Mul<f64> for Var<'s> {
    type Output = Var<'s>;

    fn mul(self, rhs: f64) -> Self::Output {
        self.unary(self.value * rhs, rhs)
    }
}

impl<'s> Add<Var<'s>> for f64 {
    type Output = Var<'s>;

    fn add(self, rhs: Var<'s>) -> Self::Output {
        rhs + self
    }
}

impl<'s> Sub<Var<'s>> for f64 {
    type Output = Var<'s>;

    fn sub(self, rhs: Var<'s>) -> Self::Output {
        rhs.unary(self - rhs.value, -1.)
    }
}

impl<'s> Mul<Var<'s>> for f64 {
    type Output = Var<'s>;

    fn mul(self, rhs: Var<'s>) -> Self::Output {
        rhs * self
    }
}

impl<'s> Neg for Var<'s> {
    type Output = Var<'s>;

    fn neg(self) -> Self::Output {
        self.unary(-self.value, -1.)
    }
}
