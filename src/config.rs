use std::{
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    training::{DEFAULT_EPOCHS, DEFAULT_LEARNING_RATE, DEFAULT_PROGRESS_EVERY, PhiModel},
};

/// The configuration of a `PhiModel`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub num_nodes: usize,
    pub num_layers: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Seed for the model's random number generator, `None` seeds it from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ModelConfig {
    /// Creates the random number generator this configuration asks for.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Builds a new `PhiModel` following this configuration.
    ///
    /// # Returns
    /// The model, or `InvalidParameter` if any of the values is out of range.
    pub fn build(&self) -> Result<PhiModel<StdRng>> {
        PhiModel::new(
            self.num_nodes,
            self.num_layers,
            self.learning_rate,
            self.rng(),
        )
    }
}

/// The configuration of a complete training run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub model: ModelConfig,
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    /// The amount of synthetic samples to train with.
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_progress_every")]
    pub progress_every: NonZeroUsize,
    /// Where to write the phi history as JSON once training ends.
    #[serde(default)]
    pub history_out: Option<PathBuf>,
}

impl RunConfig {
    /// Parses a `RunConfig` from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads a `RunConfig` from a JSON file.
    ///
    /// # Arguments
    /// * `path` - The path of the file.
    ///
    /// # Returns
    /// The configuration, or an error if the file can't be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig {
                num_nodes: 20,
                num_layers: 5,
                learning_rate: DEFAULT_LEARNING_RATE,
                seed: Some(42),
            },
            epochs: DEFAULT_EPOCHS,
            samples: default_samples(),
            progress_every: DEFAULT_PROGRESS_EVERY,
            history_out: None,
        }
    }
}

fn default_learning_rate() -> f64 {
    DEFAULT_LEARNING_RATE
}

fn default_epochs() -> usize {
    DEFAULT_EPOCHS
}

fn default_samples() -> usize {
    1000
}

fn default_progress_every() -> NonZeroUsize {
    DEFAULT_PROGRESS_EVERY
}
