mod integration_fn;
mod magnitude;

pub use integration_fn::{IntegrationFn, PHI_CAP};
pub use magnitude::WeightMagnitude;
