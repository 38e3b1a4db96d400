use ndarray::{Array2, ArrayView2};
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use super::activations::Tanh;
use crate::{PhiErr, Result};

/// Scale applied to the standard-normal draws of a freshly created network.
pub const INIT_SCALE: f64 = 0.1;

/// A stack of square weight matrices, all of them `num_nodes × num_nodes`.
///
/// Information flows through the layers in order when computing a forward pass.
/// The shape of the network never changes after construction, only its weights.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    num_nodes: usize,
    layers: Vec<Array2<f64>>,
    act_fn: Tanh,
}

impl Network {
    /// Creates a new `Network` with small random weights.
    ///
    /// # Arguments
    /// * `num_nodes` - The amount of nodes per layer.
    /// * `num_layers` - The amount of layers.
    /// * `rng` - The random number generator to sample the weights from.
    ///
    /// # Returns
    /// A new `Network` whose entries are standard-normal draws scaled by `INIT_SCALE`, or
    /// `InvalidParameter` if either count is zero.
    pub fn new<R>(num_nodes: usize, num_layers: usize, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        if num_nodes == 0 {
            return Err(PhiErr::invalid("num_nodes", "must be positive"));
        }
        if num_layers == 0 {
            return Err(PhiErr::invalid("num_layers", "must be positive"));
        }

        let shape = (num_nodes, num_nodes);
        let layers = (0..num_layers)
            .map(|_| Array2::<f64>::random_using(shape, StandardNormal, &mut *rng))
            .map(|layer| layer * INIT_SCALE)
            .collect();

        Ok(Self {
            num_nodes,
            layers,
            act_fn: Tanh,
        })
    }

    /// Creates a new `Network` from already built weight matrices.
    ///
    /// # Arguments
    /// * `layers` - The weight matrices, in forward order.
    ///
    /// # Returns
    /// An `InvalidParameter` error if there are no layers, if any of them isn't square or if
    /// they don't all share the same shape.
    pub fn from_layers(layers: Vec<Array2<f64>>) -> Result<Self> {
        let Some(first) = layers.first() else {
            return Err(PhiErr::invalid("layers", "at least one layer is required"));
        };

        let (rows, cols) = first.dim();
        if rows == 0 || rows != cols {
            return Err(PhiErr::invalid(
                "layers",
                format!("layers must be non-empty square matrices, got {rows}x{cols}"),
            ));
        }

        if let Some(i) = layers.iter().position(|l| l.dim() != (rows, cols)) {
            let (r, c) = layers[i].dim();
            return Err(PhiErr::invalid(
                "layers",
                format!("layer {i} is {r}x{c}, expected {rows}x{cols}"),
            ));
        }

        Ok(Self {
            num_nodes: rows,
            layers,
            act_fn: Tanh,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// The amount of weights in the entire network.
    pub fn size(&self) -> usize {
        self.num_layers() * self.num_nodes * self.num_nodes
    }

    pub fn layers(&self) -> &[Array2<f64>] {
        &self.layers
    }

    /// Checks that `x` has one column per node.
    ///
    /// # Returns
    /// `ShapeMismatch` if the amount of columns isn't `num_nodes`.
    pub fn check_input(&self, x: ArrayView2<f64>) -> Result<()> {
        if x.ncols() != self.num_nodes {
            return Err(PhiErr::ShapeMismatch {
                what: "input columns",
                got: x.ncols(),
                expected: self.num_nodes,
            });
        }

        Ok(())
    }

    /// Makes a forward pass through the network.
    ///
    /// Each layer applies `x = tanh(x · W)`. Saturated values may round to `±1.0` in floating
    /// point for very large pre-activations.
    ///
    /// # Arguments
    /// * `x` - The input batch, one sample per row.
    ///
    /// # Returns
    /// An output batch with the same shape as the input, or `ShapeMismatch` if the amount of
    /// columns isn't `num_nodes`.
    pub fn forward(&self, x: ArrayView2<f64>) -> Result<Array2<f64>> {
        self.check_input(x)?;

        let act_fn = self.act_fn;
        let mut x = x.to_owned();

        for w in &self.layers {
            x = x.dot(w);
            x.mapv_inplace(|z| act_fn.f(z));
        }

        Ok(x)
    }

    /// Adds `scale * N(0, 1)` noise to every weight, in place.
    ///
    /// Draws are taken layer by layer in row-major order so that a seeded generator always
    /// yields the same network.
    pub(crate) fn perturb<R: Rng + ?Sized>(&mut self, scale: f64, rng: &mut R) {
        for layer in &mut self.layers {
            for w in layer.iter_mut() {
                let noise: f64 = StandardNormal.sample(rng);
                *w += scale * noise;
            }
        }
    }
}
