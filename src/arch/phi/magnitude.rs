use rayon::prelude::*;

use super::{IntegrationFn, PHI_CAP};
use crate::arch::Network;

/// Phi as the total absolute weight magnitude normalized by the magnitude the network would have
/// if every weight were `±1`, capped at `PHI_CAP`.
///
/// Weights aren't clipped, so the raw ratio can go past one after enough noise has been added.
#[derive(Default, Clone, Copy, Debug)]
pub struct WeightMagnitude;

impl IntegrationFn for WeightMagnitude {
    fn phi(&self, network: &Network) -> f64 {
        // per layer sums run in parallel, the total is folded in layer order
        let layer_sums: Vec<f64> = network
            .layers()
            .par_iter()
            .map(|layer| layer.iter().map(|w| w.abs()).sum::<f64>())
            .collect();

        let total: f64 = layer_sums.iter().sum();
        let max_integration = network.size() as f64;

        (total / max_integration).min(PHI_CAP)
    }
}
