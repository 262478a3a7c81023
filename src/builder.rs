use log::info;
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Polynomial, Result, TrainErr,
    config::{ModelConfig, OptimizerConfig, ParamGenConfig, StoreConfig, TrainingConfig},
    initialization::{ConstParamGen, ParamGen, RandParamGen},
    optimization::{GradientDescent, GradientDescentWithMomentum, Optimizer},
    storage::{BlockingStore, Store, WildStore},
    training::{SequentialTrainer, Trainer},
};

/// Turns a `TrainingConfig` into ready to run trainers.
#[derive(Debug, Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a parallel `Trainer` from a `TrainingConfig`.
    ///
    /// # Arguments
    /// * `config` - The training configuration.
    ///
    /// # Returns
    /// A trainer owning a freshly initialized shared model, or an error if the
    /// initialization parameters are invalid.
    pub fn build(&self, config: &TrainingConfig) -> Result<Trainer<Box<dyn Store>>> {
        let initial = self.initial_model(&config.model, config.seed)?;
        let optimizer = self.optimizer(config.optimizer, initial.len());

        let store: Box<dyn Store> = match config.store {
            StoreConfig::Wild => Box::new(WildStore::new(initial, optimizer)),
            StoreConfig::Blocking => Box::new(BlockingStore::new(initial, optimizer)),
        };

        info!(
            "built trainer: {} workers, {:?} store, {:?}",
            config.workers, config.store, config.optimizer
        );

        let trainer = Trainer::new(store, config.workers);

        Ok(match (config.shuffle, config.seed) {
            (true, Some(seed)) => trainer.with_shuffle(seed),
            (true, None) => trainer.with_shuffle(rand::random()),
            (false, _) => trainer,
        })
    }

    /// Builds the single threaded baseline from a `TrainingConfig`.
    ///
    /// The store, worker and shuffle settings don't apply to it and are ignored.
    pub fn build_sequential(
        &self,
        config: &TrainingConfig,
    ) -> Result<SequentialTrainer<Box<dyn Optimizer>>> {
        let initial = self.initial_model(&config.model, config.seed)?;
        let optimizer = self.optimizer(config.optimizer, initial.len());
        Ok(SequentialTrainer::new(initial, optimizer))
    }

    fn initial_model(&self, model: &ModelConfig, seed: Option<u64>) -> Result<Polynomial<f64>> {
        let n = model.params.get();
        let rng = || match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let params = match model.init {
            ParamGenConfig::Const { value } => ConstParamGen::new(value, n).collect_all(),
            ParamGenConfig::Uniform { low, high } => {
                RandParamGen::uniform(rng(), n, low, high)?.collect_all()
            }
            ParamGenConfig::Normal { mean, std_dev } => {
                RandParamGen::normal(rng(), n, mean, std_dev)?.collect_all()
            }
        };

        if params.len() != n {
            return Err(TrainErr::SizeMismatch {
                a: "initial parameters",
                b: "model",
                got: params.len(),
                expected: n,
            });
        }

        Polynomial::new(params)
    }

    fn optimizer(&self, config: OptimizerConfig, len: usize) -> Box<dyn Optimizer> {
        match config {
            OptimizerConfig::GradientDescent { lr } => Box::new(GradientDescent::new(lr)),
            OptimizerConfig::GradientDescentWithMomentum { lr, mu } => {
                Box::new(GradientDescentWithMomentum::new(len, lr, mu))
            }
        }
    }
}
