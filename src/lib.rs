//! A layered weight network whose weights are perturbed with random noise epoch after epoch,
//! while a bounded integration metric (phi) computed from the weight magnitudes is recorded.

pub mod arch;
pub mod config;
pub mod error;
pub mod training;

pub use arch::{
    Network,
    phi::{IntegrationFn, PHI_CAP, WeightMagnitude},
};
pub use config::{ModelConfig, RunConfig};
pub use error::{PhiErr, Result};
pub use training::{EpochObserver, EpochReport, PhiHistory, PhiModel, ProgressLogger};
