use log::{debug, info, warn};
use ndarray::{Array2, ArrayView2};
use rand::{Rng, rngs::StdRng};

use super::{EpochObserver, EpochReport, PhiHistory, ProgressLogger};
use crate::{
    ModelConfig, PhiErr, Result,
    arch::{
        Network,
        phi::{IntegrationFn, PHI_CAP, WeightMagnitude},
    },
};

pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_EPOCHS: usize = 100;

/// The fixed parameters of a `PhiModel`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hyperparams {
    pub num_nodes: usize,
    pub num_layers: usize,
    pub learning_rate: f64,
}

/// Where a `PhiModel` is in its training lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrainingState {
    #[default]
    Idle,
    Running {
        epoch: usize,
    },
    /// `epochs` is the total amount of epochs run by the model so far.
    Completed {
        epochs: usize,
    },
}

/// A layered network whose weights are randomly perturbed on each epoch while the evolution of
/// its phi value is recorded.
///
/// The model exclusively owns its network, its history and the random number generator every
/// weight is sampled with, so a seeded generator makes the entire run reproducible.
pub struct PhiModel<R, P = WeightMagnitude>
where
    R: Rng,
    P: IntegrationFn,
{
    network: Network,
    history: PhiHistory,
    learning_rate: f64,
    state: TrainingState,
    phi_fn: P,
    rng: R,
}

impl<R: Rng> PhiModel<R> {
    /// Creates a new `PhiModel` with a randomly initialized network.
    ///
    /// # Arguments
    /// * `num_nodes` - The amount of nodes per layer.
    /// * `num_layers` - The amount of layers.
    /// * `learning_rate` - The scale of the noise added to the weights on every epoch.
    /// * `rng` - The random number generator used for initialization and training.
    ///
    /// # Returns
    /// A new `PhiModel` or `InvalidParameter` if any of the arguments is out of range.
    pub fn new(
        num_nodes: usize,
        num_layers: usize,
        learning_rate: f64,
        mut rng: R,
    ) -> Result<Self> {
        validate_learning_rate(learning_rate)?;
        let network = Network::new(num_nodes, num_layers, &mut rng)?;
        Self::with_network(network, learning_rate, rng)
    }

    /// Creates a new `PhiModel` that trains an already built network.
    ///
    /// # Arguments
    /// * `network` - The initial network.
    /// * `learning_rate` - The scale of the noise added to the weights on every epoch.
    /// * `rng` - The random number generator used for training.
    pub fn with_network(network: Network, learning_rate: f64, rng: R) -> Result<Self> {
        PhiModel::with_integration_fn(network, learning_rate, WeightMagnitude, rng)
    }
}

impl PhiModel<StdRng> {
    /// Creates a new `PhiModel` following a configuration.
    ///
    /// See `ModelConfig::build`.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        config.build()
    }
}

impl<R, P> PhiModel<R, P>
where
    R: Rng,
    P: IntegrationFn,
{
    /// Creates a new `PhiModel` that measures its network with a custom integration function.
    ///
    /// # Arguments
    /// * `network` - The initial network.
    /// * `learning_rate` - The scale of the noise added to the weights on every epoch.
    /// * `phi_fn` - The integration function phi is computed with.
    /// * `rng` - The random number generator used for training.
    pub fn with_integration_fn(
        network: Network,
        learning_rate: f64,
        phi_fn: P,
        rng: R,
    ) -> Result<Self> {
        validate_learning_rate(learning_rate)?;

        Ok(Self {
            network,
            history: PhiHistory::new(),
            learning_rate,
            state: TrainingState::Idle,
            phi_fn,
            rng,
        })
    }

    pub fn hyperparams(&self) -> Hyperparams {
        Hyperparams {
            num_nodes: self.network.num_nodes(),
            num_layers: self.network.num_layers(),
            learning_rate: self.learning_rate,
        }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn state(&self) -> TrainingState {
        self.state
    }

    /// Returns every phi value recorded so far, in epoch order.
    pub fn phi_history(&self) -> &PhiHistory {
        &self.history
    }

    /// Computes the phi value of the current network.
    pub fn calculate_phi(&self) -> f64 {
        self.phi_fn.phi(&self.network)
    }

    /// Makes a forward pass through the network without modifying it.
    ///
    /// # Arguments
    /// * `input` - A batch of shape `(batch, num_nodes)`.
    ///
    /// # Returns
    /// The output batch, with the same shape as `input`.
    pub fn forward(&self, input: ArrayView2<f64>) -> Result<Array2<f64>> {
        self.network.forward(input)
    }

    /// Trains the model for `epochs` epochs, logging the progress every 10 of them.
    ///
    /// See `train_with`.
    pub fn train(&mut self, data: ArrayView2<f64>, epochs: usize) -> Result<()> {
        self.train_with(data, epochs, &mut ProgressLogger::default())
    }

    /// Trains the model for `epochs` epochs.
    ///
    /// On each epoch the data is forwarded through the network, every weight gets
    /// `learning_rate * N(0, 1)` added to it and the resulting phi is appended to the history.
    /// The noise isn't directed by any gradient.
    ///
    /// # Arguments
    /// * `data` - The input samples, of shape `(samples, num_nodes)`.
    /// * `epochs` - The amount of epochs to run, zero leaves the model untouched.
    /// * `observer` - Gets notified at the end of every epoch.
    ///
    /// # Returns
    /// `ShapeMismatch` if `data` doesn't have `num_nodes` columns, in which case no epoch runs.
    pub fn train_with<O>(
        &mut self,
        data: ArrayView2<f64>,
        epochs: usize,
        observer: &mut O,
    ) -> Result<()>
    where
        O: EpochObserver + ?Sized,
    {
        self.network.check_input(data)?;

        if epochs == 0 {
            debug!("no epochs requested, skipping training");
            return Ok(());
        }

        info!(epochs = epochs, samples = data.nrows(); "training started");
        let mut saturated = false;

        for epoch in 1..=epochs {
            self.state = TrainingState::Running { epoch };

            // The output is unused until there's a supervised objective to compare it against.
            let _output = self.network.forward(data)?;

            self.network.perturb(self.learning_rate, &mut self.rng);

            let phi = self.calculate_phi();
            self.history.push(phi);
            debug!(epoch = epoch, phi = phi; "epoch finished");

            if phi >= PHI_CAP && !saturated {
                warn!(epoch = epoch; "phi reached its cap of {PHI_CAP}");
                saturated = true;
            }

            observer.on_epoch(EpochReport { epoch, epochs, phi });
        }

        self.state = TrainingState::Completed {
            epochs: self.history.len(),
        };
        info!(total_epochs = self.history.len(); "training finished");

        Ok(())
    }
}

fn validate_learning_rate(learning_rate: f64) -> Result<()> {
    if !learning_rate.is_finite() || learning_rate <= 0.0 {
        return Err(PhiErr::invalid(
            "learning_rate",
            format!("must be a positive finite number, got {learning_rate}"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use ndarray_rand::RandomExt;
    use rand::{SeedableRng, rngs::StdRng};
    use rand_distr::StandardNormal;

    fn seeded_model(seed: u64) -> PhiModel<StdRng> {
        PhiModel::new(10, 3, DEFAULT_LEARNING_RATE, StdRng::seed_from_u64(seed)).unwrap()
    }

    fn data(samples: usize, nodes: usize) -> Array2<f64> {
        Array2::random_using((samples, nodes), StandardNormal, &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn starts_idle_with_empty_history() {
        let model = seeded_model(0);

        assert_eq!(model.state(), TrainingState::Idle);
        assert!(model.phi_history().is_empty());
        assert_eq!(
            model.hyperparams(),
            Hyperparams {
                num_nodes: 10,
                num_layers: 3,
                learning_rate: 0.01,
            }
        );
    }

    #[test]
    fn invalid_learning_rates_are_rejected() {
        for lr in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let res = PhiModel::new(4, 2, lr, StdRng::seed_from_u64(0));
            assert!(matches!(
                res,
                Err(PhiErr::InvalidParameter {
                    what: "learning_rate",
                    ..
                })
            ));
        }
    }

    #[test]
    fn train_records_one_phi_per_epoch() {
        let mut model = seeded_model(42);
        let data = data(100, 10);

        model.train(data.view(), 50).unwrap();

        assert_eq!(model.phi_history().len(), 50);
        assert!(model.phi_history().iter().all(|phi| (0.0..=1.0).contains(phi)));
        assert_eq!(model.state(), TrainingState::Completed { epochs: 50 });
    }

    #[test]
    fn last_recorded_phi_matches_the_current_network() {
        let mut model = seeded_model(5);
        model.train(data(8, 10).view(), 3).unwrap();

        assert_eq!(model.phi_history().last(), Some(&model.calculate_phi()));
    }

    #[test]
    fn zero_epochs_leave_the_model_untouched() {
        let mut model = seeded_model(3);
        let before = model.network().clone();

        model.train(data(4, 10).view(), 0).unwrap();

        assert!(model.phi_history().is_empty());
        assert_eq!(model.network(), &before);
        assert_eq!(model.state(), TrainingState::Idle);
    }

    #[test]
    fn bad_data_fails_before_any_epoch() {
        let mut model = seeded_model(3);
        let before = model.network().clone();

        let res = model.train(data(4, 7).view(), 5);

        assert!(matches!(
            res,
            Err(PhiErr::ShapeMismatch {
                got: 7,
                expected: 10,
                ..
            })
        ));
        assert!(model.phi_history().is_empty());
        assert_eq!(model.network(), &before);
    }

    #[test]
    fn observer_sees_every_epoch() {
        let mut model = seeded_model(9);
        let mut reports = Vec::new();
        let mut observer = |report: EpochReport| reports.push(report);

        model.train_with(data(2, 10).view(), 4, &mut observer).unwrap();

        let epochs: Vec<usize> = reports.iter().map(|r| r.epoch).collect();
        let phis: Vec<f64> = reports.iter().map(|r| r.phi).collect();
        assert_eq!(epochs, [1, 2, 3, 4]);
        assert!(reports.iter().all(|r| r.epochs == 4));
        assert_eq!(phis, model.phi_history().as_slice());
    }

    #[test]
    fn huge_learning_rate_saturates_phi() {
        let mut model = PhiModel::new(3, 2, 1e3, StdRng::seed_from_u64(11)).unwrap();
        model.train(data(1, 3).view(), 2).unwrap();

        assert!(model.phi_history().iter().all(|&phi| phi == PHI_CAP));
    }
}
