use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// The ordered log of phi values, one per completed epoch.
///
/// It only grows, and only the trainer that owns it can append to it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhiHistory {
    values: Vec<f64>,
}

/// Aggregates of a `PhiHistory`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhiSummary {
    pub epochs: usize,
    pub first: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl PhiHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, phi: f64) {
        self.values.push(phi);
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Returns the summary of the recorded values, or `None` if nothing was recorded yet.
    pub fn summary(&self) -> Option<PhiSummary> {
        let (&first, &last) = (self.values.first()?, self.values.last()?);

        let (min, max, sum) = self.values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &phi| (min.min(phi), max.max(phi), sum + phi),
        );

        Some(PhiSummary {
            epochs: self.values.len(),
            first,
            last,
            min,
            max,
            mean: sum / self.values.len() as f64,
        })
    }
}

impl Deref for PhiHistory {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}
