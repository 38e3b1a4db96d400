use std::num::NonZeroUsize;

use log::info;

/// The interval, in epochs, between progress reports of a `ProgressLogger::default()`.
pub const DEFAULT_PROGRESS_EVERY: NonZeroUsize = NonZeroUsize::new(10).unwrap();

/// What happened in a single epoch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpochReport {
    /// 1-based index of the epoch within the current `train` call.
    pub epoch: usize,
    /// The amount of epochs requested for the current `train` call.
    pub epochs: usize,
    /// The phi value recorded at the end of the epoch.
    pub phi: f64,
}

/// Gets notified after every training epoch.
pub trait EpochObserver {
    fn on_epoch(&mut self, report: EpochReport);
}

impl<F: FnMut(EpochReport)> EpochObserver for F {
    fn on_epoch(&mut self, report: EpochReport) {
        self(report)
    }
}

/// Logs the training progress every `every` epochs.
#[derive(Clone, Copy, Debug)]
pub struct ProgressLogger {
    every: NonZeroUsize,
}

impl ProgressLogger {
    /// Creates a new `ProgressLogger`.
    ///
    /// # Arguments
    /// * `every` - The amount of epochs between reports.
    pub fn new(every: NonZeroUsize) -> Self {
        Self { every }
    }

    fn should_report(&self, epoch: usize) -> bool {
        epoch % self.every.get() == 0
    }
}

impl Default for ProgressLogger {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_EVERY)
    }
}

impl EpochObserver for ProgressLogger {
    fn on_epoch(&mut self, report: EpochReport) {
        let EpochReport { epoch, epochs, phi } = report;

        if self.should_report(epoch) {
            info!(epoch = epoch, phi = phi; "epoch {epoch}/{epochs}, phi: {phi:.4}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_on_multiples_of_the_interval() {
        let logger = ProgressLogger::default();

        let reported: Vec<usize> = (1..=35).filter(|&e| logger.should_report(e)).collect();
        assert_eq!(reported, [10, 20, 30]);
    }

    #[test]
    fn closures_are_observers() {
        let mut seen = Vec::new();
        {
            let mut observer = |report: EpochReport| seen.push(report.epoch);
            for epoch in 1..=3 {
                observer.on_epoch(EpochReport {
                    epoch,
                    epochs: 3,
                    phi: 0.0,
                });
            }
        }

        assert_eq!(seen, [1, 2, 3]);
    }
}
