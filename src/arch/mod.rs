pub mod activations;
mod network;
pub mod phi;

pub use network::{INIT_SCALE, Network};
