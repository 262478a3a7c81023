/// A `ParamGen` generates values for the initial state of the model's parameters.
pub trait ParamGen {
    /// Should sample at most `n` parameters.
    ///
    /// # Arguments
    /// * `n` - The upper limit of samples to generate.
    ///
    /// # Returns
    /// `None` once the generator is exhausted.
    fn sample(&mut self, n: usize) -> Option<Vec<f64>>;

    /// Drains the generator into a single parameter vector.
    fn collect_all(&mut self) -> Vec<f64> {
        let mut params = Vec::new();

        while let Some(chunk) = self.sample(usize::MAX) {
            params.extend(chunk);
        }

        params
    }
}
