use std::{fs, num::NonZeroUsize, path::Path};

use serde::Deserialize;

use crate::{Dataset, Result, TrainErr};

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamGenConfig {
    Const { value: f64 },
    Uniform { low: f64, high: f64 },
    Normal { mean: f64, std_dev: f64 },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptimizerConfig {
    GradientDescent { lr: f64 },
    GradientDescentWithMomentum { lr: f64, mu: f64 },
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreConfig {
    #[default]
    Wild,
    Blocking,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetConfig {
    Inline { xs: Vec<f64>, ys: Vec<f64> },
    Polynomial { coeffs: Vec<f64>, xs: Vec<f64> },
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub params: NonZeroUsize,
    pub init: ParamGenConfig,
}

/// Everything needed to set up a training run.
///
/// Every field is optional when deserializing; missing ones take the value of
/// `TrainingConfig::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub epochs: usize,
    pub workers: NonZeroUsize,
    pub model: ModelConfig,
    pub optimizer: OptimizerConfig,
    pub store: StoreConfig,
    pub dataset: DatasetConfig,
    pub shuffle: bool,
    pub seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            params: NonZeroUsize::new(3).unwrap_or(NonZeroUsize::MIN),
            init: ParamGenConfig::Const { value: 0. },
        }
    }
}

impl Default for DatasetConfig {
    /// Samples of `f(x) = 3x^2 - x + 1`.
    fn default() -> Self {
        Self::Inline {
            xs: vec![1., 2., 3., 1.5],
            ys: vec![3., 11., 25., 6.25],
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: 10_000,
            workers: NonZeroUsize::new(8).unwrap_or(NonZeroUsize::MIN),
            model: ModelConfig::default(),
            optimizer: OptimizerConfig::GradientDescent { lr: 0.01 },
            store: StoreConfig::default(),
            dataset: DatasetConfig::default(),
            shuffle: false,
            seed: None,
        }
    }
}

impl TrainingConfig {
    /// Parses and validates a JSON training config.
    ///
    /// # Errors
    /// An `InvalidConfig` error if the JSON is malformed or describes an invalid run.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON training config from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks the constraints the types alone can't express.
    pub fn validate(&self) -> Result<()> {
        let lr = match self.optimizer {
            OptimizerConfig::GradientDescent { lr } => lr,
            OptimizerConfig::GradientDescentWithMomentum { lr, mu } => {
                if !(0. ..1.).contains(&mu) {
                    return invalid(format!("momentum must be in [0, 1), got {mu}"));
                }
                lr
            }
        };

        if !lr.is_finite() || lr <= 0. {
            return invalid(format!("learning rate must be positive, got {lr}"));
        }

        match &self.dataset {
            DatasetConfig::Inline { xs, ys } if xs.len() != ys.len() => invalid(format!(
                "dataset has {} inputs but {} targets",
                xs.len(),
                ys.len()
            )),
            DatasetConfig::Polynomial { coeffs, .. } if coeffs.is_empty() => {
                invalid("dataset polynomial needs at least one coefficient".into())
            }
            _ => Ok(()),
        }
    }
}

impl DatasetConfig {
    /// Materializes the dataset.
    pub fn build(&self) -> Result<Dataset> {
        match self {
            DatasetConfig::Inline { xs, ys } => Dataset::new(xs, ys),
            DatasetConfig::Polynomial { coeffs, xs } => {
                let f = crate::Polynomial::new(coeffs.clone())?;
                Ok(Dataset::from_fn(xs, |x| f.evaluate(x)))
            }
        }
    }
}

fn invalid(msg: String) -> Result<()> {
    Err(TrainErr::InvalidConfig(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_the_default_run() {
        let config = TrainingConfig::from_json("{}").unwrap();

        assert_eq!(config.epochs, 10_000);
        assert_eq!(config.workers.get(), 8);
        assert_eq!(config.model.params.get(), 3);
        assert!(matches!(config.store, StoreConfig::Wild));
        assert!(matches!(
            config.optimizer,
            OptimizerConfig::GradientDescent { lr } if lr == 0.01
        ));
        assert_eq!(config.dataset.build().unwrap().len(), 4);
    }

    #[test]
    fn full_config() {
        let json = r#"{
            "epochs": 50,
            "workers": 2,
            "model": { "params": 4, "init": { "kind": "uniform", "low": -1.0, "high": 1.0 } },
            "optimizer": { "kind": "gradient_descent_with_momentum", "lr": 0.001, "mu": 0.9 },
            "store": "blocking",
            "dataset": { "kind": "polynomial", "coeffs": [1.0, -1.0, 3.0], "xs": [1.0, 2.0] },
            "shuffle": true,
            "seed": 7
        }"#;

        let config = TrainingConfig::from_json(json).unwrap();
        assert_eq!(config.epochs, 50);
        assert_eq!(config.model.params.get(), 4);
        assert!(matches!(config.store, StoreConfig::Blocking));
        assert_eq!(config.seed, Some(7));

        let dataset = config.dataset.build().unwrap();
        let ys: Vec<_> = dataset.iter().map(|s| s.y).collect();
        assert_eq!(ys, vec![3., 11.]);
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(TrainingConfig::from_json(r#"{ "workers": 0 }"#).is_err());
    }

    #[test]
    fn mismatched_inline_dataset_is_rejected() {
        let json = r#"{ "dataset": { "kind": "inline", "xs": [1.0, 2.0], "ys": [1.0] } }"#;
        let err = TrainingConfig::from_json(json).unwrap_err();
        assert!(matches!(err, TrainErr::InvalidConfig(_)));
    }

    #[test]
    fn non_positive_learning_rate_is_rejected() {
        let json = r#"{ "optimizer": { "kind": "gradient_descent", "lr": 0.0 } }"#;
        assert!(TrainingConfig::from_json(json).is_err());
    }

    #[test]
    fn unknown_store_is_rejected() {
        assert!(TrainingConfig::from_json(r#"{ "store": "sharded" }"#).is_err());
    }
}
