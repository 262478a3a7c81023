use std::env;

use anyhow::Context;
use log::info;

use hogwild_trainer::{TrainerBuilder, TrainingConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut sequential = false;
    let mut path = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--sequential" => sequential = true,
            _ => path = Some(arg),
        }
    }

    let config = match path {
        Some(path) => TrainingConfig::load(&path)
            .with_context(|| format!("failed to load config from '{path}'"))?,
        None => {
            info!("no config given, running the default example");
            TrainingConfig::default()
        }
    };

    let dataset = config.dataset.build()?;
    let builder = TrainerBuilder::new();

    let report = if sequential {
        builder
            .build_sequential(&config)?
            .run(&dataset, config.epochs)?
    } else {
        builder.build(&config)?.run(&dataset, config.epochs)?
    };

    if let Some(loss) = report.final_loss() {
        info!("final mean loss: {loss:.6e}");
    }

    println!("Final parameters: {:?}", report.params);
    Ok(())
}
