use crate::arch::Network;

/// Upper bound for every phi value.
pub const PHI_CAP: f64 = 1.0;

/// Measures how integrated a network is as a single bounded scalar.
pub trait IntegrationFn {
    /// Computes the phi value of `network`, always within `[0, PHI_CAP]`.
    fn phi(&self, network: &Network) -> f64;
}
