use rand::Rng;
use rand_distr::{Distribution, Normal, Uniform};

use super::ParamGen;
use crate::Result;

/// A parameter generator that follows a certain probabilistic distribution.
pub struct RandParamGen<R: Rng, D: Distribution<f64>> {
    rng: R,
    distribution: D,
    remaining: usize,
}

impl<R: Rng, D: Distribution<f64>> RandParamGen<R, D> {
    /// Creates a new `RandParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `distribution` - The distribution to sample the random numbers from.
    /// * `limit` - The maximum amount of numbers to generate.
    pub fn new(rng: R, distribution: D, limit: usize) -> Self {
        Self {
            rng,
            distribution,
            remaining: limit,
        }
    }
}

impl<R: Rng> RandParamGen<R, Uniform<f64>> {
    /// Creates a new `RandParamGen` with a uniform distribution over `[low, high)`.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high).
    pub fn uniform(rng: R, limit: usize, low: f64, high: f64) -> Result<Self> {
        Ok(Self::new(rng, Uniform::new(low, high)?, limit))
    }
}

impl<R: Rng> RandParamGen<R, Normal<f64>> {
    /// Creates a new `RandParamGen` with a normal distribution.
    ///
    /// # Returns
    /// An error if `std_dev` is not finite (NaN or infinite).
    pub fn normal(rng: R, limit: usize, mean: f64, std_dev: f64) -> Result<Self> {
        Ok(Self::new(rng, Normal::new(mean, std_dev)?, limit))
    }
}

impl<R: Rng, D: Distribution<f64>> ParamGen for RandParamGen<R, D> {
    fn sample(&mut self, mut n: usize) -> Option<Vec<f64>> {
        if self.remaining == 0 || n == 0 {
            return None;
        }

        n = n.min(self.remaining);
        self.remaining -= n;

        let params = (&self.distribution)
            .sample_iter(&mut self.rng)
            .take(n)
            .collect();

        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn uniform_within_range() {
        let rng = StdRng::seed_from_u64(42);
        let mut param_gen = RandParamGen::uniform(rng, 100, -0.5, 0.5).unwrap();

        let params = param_gen.sample(100).unwrap();
        assert_eq!(params.len(), 100);
        assert!(params.iter().all(|p| (-0.5..0.5).contains(p)));
        assert!(param_gen.sample(1).is_none());
    }

    #[test]
    fn invalid_uniform_range() {
        let rng = StdRng::seed_from_u64(42);
        assert!(RandParamGen::uniform(rng, 1, 1., 1.).is_err());
    }

    #[test]
    fn invalid_normal_std_dev() {
        let rng = StdRng::seed_from_u64(42);
        assert!(RandParamGen::normal(rng, 1, 0., f64::NAN).is_err());
    }

    #[test]
    fn same_seed_same_parameters() {
        let sample = |seed| {
            let rng = StdRng::seed_from_u64(seed);
            RandParamGen::normal(rng, 8, 0., 1.).unwrap().collect_all()
        };

        assert_eq!(sample(3), sample(3));
        assert_ne!(sample(3), sample(4));
    }
}
