use rand::{Rng, seq::SliceRandom};

use crate::{Result, TrainErr};

/// A single training example, the unit of work handed to the workers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A fully materialized, ordered set of samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Creates a new `Dataset` pairing every input with its target.
    ///
    /// # Arguments
    /// * `xs` - The inputs.
    /// * `ys` - The expected outputs, one per input.
    ///
    /// # Returns
    /// A `SizeMismatch` error if `xs` and `ys` have different lengths.
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(TrainErr::SizeMismatch {
                a: "targets",
                b: "inputs",
                got: ys.len(),
                expected: xs.len(),
            });
        }

        Ok(xs.iter().copied().zip(ys.iter().copied()).collect())
    }

    /// Creates a new `Dataset` whose targets are generated by `f`.
    pub fn from_fn<F>(xs: &[f64], f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        xs.iter().map(|&x| (x, f(x))).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// Randomly reorders the samples in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.samples.shuffle(rng);
    }
}

impl FromIterator<(f64, f64)> for Dataset {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().map(Sample::from).collect(),
        }
    }
}

impl FromIterator<Sample> for Dataset {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}
