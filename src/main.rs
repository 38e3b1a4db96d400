use std::{env, fs, io};

use log::{info, warn};
use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand_distr::StandardNormal;

use phi_network::{PhiModel, ProgressLogger, RunConfig};

fn main() -> io::Result<()> {
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => {
            info!("loading config from {path}");
            RunConfig::from_json_file(path)?
        }
        None => {
            info!("no config given, using the default run");
            RunConfig::default()
        }
    };

    let model_config = &config.model;
    let mut rng = model_config.rng();

    // data is drawn first so that the network weights come after it in the rng stream
    let shape = (config.samples, model_config.num_nodes);
    let data = Array2::<f64>::random_using(shape, StandardNormal, &mut rng);

    let mut model = PhiModel::new(
        model_config.num_nodes,
        model_config.num_layers,
        model_config.learning_rate,
        rng,
    )?;
    info!(
        "model with {} layers of {} nodes, initial phi: {:.4}",
        model_config.num_layers,
        model_config.num_nodes,
        model.calculate_phi()
    );

    let mut logger = ProgressLogger::new(config.progress_every);
    model.train_with(data.view(), config.epochs, &mut logger)?;

    let history = model.phi_history();
    match history.summary() {
        Some(summary) => info!(
            "phi over {} epochs: first {:.4}, min {:.4}, max {:.4}, mean {:.4}",
            summary.epochs, summary.first, summary.min, summary.max, summary.mean
        ),
        None => warn!("no epochs were run"),
    }

    if let Some(path) = &config.history_out {
        let json = serde_json::to_string_pretty(history).map_err(io::Error::other)?;
        fs::write(path, json)?;
        info!("phi history written to {}", path.display());
    }

    if let Some(phi) = history.last() {
        println!("Final phi after {} epochs: {phi:.4}", config.epochs);
    }

    Ok(())
}
