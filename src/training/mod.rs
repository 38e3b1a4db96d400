mod history;
mod model;
mod observer;

pub use history::{PhiHistory, PhiSummary};
pub use model::{DEFAULT_EPOCHS, DEFAULT_LEARNING_RATE, Hyperparams, PhiModel, TrainingState};
pub use observer::{DEFAULT_PROGRESS_EVERY, EpochObserver, EpochReport, ProgressLogger};
