use std::iter;

use super::ParamGen;

/// Starts every coefficient of the polynomial at the same value.
///
/// The default run starts from three zeros.
pub struct ConstParamGen {
    value: f64,
    left: usize,
}

impl ConstParamGen {
    pub fn new(value: f64, limit: usize) -> Self {
        Self { value, left: limit }
    }
}

impl ParamGen for ConstParamGen {
    fn sample(&mut self, n: usize) -> Option<Vec<f64>> {
        let take = n.min(self.left);
        if take == 0 {
            return None;
        }

        self.left -= take;
        Some(iter::repeat_n(self.value, take).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_generator_yields_nothing() {
        assert!(ConstParamGen::new(0., 0).sample(3).is_none());
        assert!(ConstParamGen::new(0., 3).sample(0).is_none());
    }

    #[test]
    fn chunks_never_exceed_the_limit() {
        let mut param_gen = ConstParamGen::new(-2.5, 5);

        assert_eq!(param_gen.sample(2), Some(vec![-2.5; 2]));
        assert_eq!(param_gen.sample(4), Some(vec![-2.5; 3]));
        assert_eq!(param_gen.sample(1), None);
    }

    #[test]
    fn zeros_for_the_reference_model() {
        let mut param_gen = ConstParamGen::new(0., 3);

        assert_eq!(param_gen.collect_all(), vec![0.; 3]);
        assert!(param_gen.collect_all().is_empty());
    }
}
