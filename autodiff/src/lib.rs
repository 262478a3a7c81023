//! A small tape-based reverse-mode differentiation engine over `f64` scalars.
//!
//! Values are recorded on a [`Stack`] while an expression is evaluated, the output
//! is seeded with [`Var::set_gradient`], [`Stack::compute_adjoint`] runs the backward
//! pass and every input reports its partial derivative through [`Var::get_gradient`].

mod stack;
mod var;

pub use stack::Stack;
pub use var::Var;
