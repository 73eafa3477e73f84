// kaitorch-core/src/nn/layers/dense.rs

use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::nn::init::Initializer;
use crate::nn::module::Module;
use crate::ops::activation::{activation_op, softmax, Activation};
use crate::registry::Registry;
use rand::RngCore;
use std::fmt;

/// Nonlinearity applied at the output of a [`Dense`] layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerActivation {
    /// Applied to every unit independently.
    Unit(Activation),
    /// Normalises the whole output row.
    Softmax,
}

impl LayerActivation {
    /// Resolves `name` through `registry`; `"softmax"` is always available.
    pub fn from_name(name: &str, registry: &Registry<Activation>) -> Result<Self, KaiTorchError> {
        if name == "softmax" {
            return Ok(LayerActivation::Softmax);
        }
        registry.resolve(name).map(LayerActivation::Unit)
    }
}

impl fmt::Display for LayerActivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerActivation::Unit(activation) => write!(f, "{}", activation),
            LayerActivation::Softmax => f.write_str("softmax"),
        }
    }
}

impl From<Activation> for LayerActivation {
    fn from(activation: Activation) -> Self {
        LayerActivation::Unit(activation)
    }
}

/// One output unit: a weight per input plus a bias.
#[derive(Debug, Clone)]
struct Unit {
    weights: Vec<NodeId>,
    bias: NodeId,
}

/// Fully connected layer: `out_j = act(b_j + Σ_i w_ji · x_i)`.
///
/// Weights and biases are all drawn from the layer's initializer when the
/// layer is built.
#[derive(Debug, Clone)]
pub struct Dense {
    units: usize,
    activation: Option<LayerActivation>,
    initializer: Initializer,
    nin: Option<usize>,
    neurons: Vec<Unit>,
}

impl Dense {
    /// A linear layer of `units` outputs with Glorot-uniform initialization.
    pub fn new(units: usize) -> Self {
        Dense {
            units,
            activation: None,
            initializer: Initializer::default(),
            nin: None,
            neurons: Vec::new(),
        }
    }

    pub fn with_activation(mut self, activation: impl Into<LayerActivation>) -> Self {
        self.activation = Some(activation.into());
        self
    }

    /// Sets the activation by name, see [`LayerActivation::from_name`].
    pub fn with_activation_name(
        mut self,
        name: &str,
        registry: &Registry<Activation>,
    ) -> Result<Self, KaiTorchError> {
        self.activation = Some(LayerActivation::from_name(name, registry)?);
        Ok(self)
    }

    pub fn with_softmax(self) -> Self {
        self.with_activation(LayerActivation::Softmax)
    }

    pub fn with_initializer(mut self, initializer: Initializer) -> Self {
        self.initializer = initializer;
        self
    }

    pub fn with_initializer_name(
        mut self,
        name: &str,
        registry: &Registry<Initializer>,
    ) -> Result<Self, KaiTorchError> {
        self.initializer = registry.resolve(name)?;
        Ok(self)
    }

    pub fn units(&self) -> usize {
        self.units
    }

    pub fn activation(&self) -> Option<LayerActivation> {
        self.activation
    }

    pub fn initializer(&self) -> Initializer {
        self.initializer
    }

    /// Weight leaves of unit `j`, once built.
    pub fn weights(&self, j: usize) -> Option<&[NodeId]> {
        self.neurons.get(j).map(|unit| unit.weights.as_slice())
    }

    /// Bias leaf of unit `j`, once built.
    pub fn bias(&self, j: usize) -> Option<NodeId> {
        self.neurons.get(j).map(|unit| unit.bias)
    }
}

impl Module for Dense {
    fn build(&mut self, nin: usize, graph: &mut Graph, rng: &mut dyn RngCore) -> Result<(), KaiTorchError> {
        if self.is_built() {
            return Ok(());
        }
        if nin == 0 || self.units == 0 {
            return Err(KaiTorchError::InvalidArgument(format!(
                "Dense layer needs nin > 0 and units > 0, got nin = {}, units = {}",
                nin, self.units
            )));
        }

        let mut neurons = Vec::with_capacity(self.units);
        for _ in 0..self.units {
            let mut weights = Vec::with_capacity(nin);
            for _ in 0..nin {
                let w = self.initializer.sample(nin, self.units, rng)?;
                weights.push(graph.leaf(w));
            }
            let b = self.initializer.sample(nin, self.units, rng)?;
            neurons.push(Unit {
                weights,
                bias: graph.leaf(b),
            });
        }
        self.neurons = neurons;
        self.nin = Some(nin);
        Ok(())
    }

    fn is_built(&self) -> bool {
        self.nin.is_some()
    }

    fn forward(
        &self,
        graph: &mut Graph,
        inputs: &[NodeId],
        _train: bool,
        _rng: &mut dyn RngCore,
    ) -> Result<Vec<NodeId>, KaiTorchError> {
        let nin = self.nin.ok_or(KaiTorchError::ModelNotBuilt)?;
        if inputs.len() != nin {
            return Err(KaiTorchError::ShapeMismatch {
                expected: nin,
                actual: inputs.len(),
                operation: "Dense::forward".to_string(),
            });
        }

        let mut outputs = Vec::with_capacity(self.units);
        for unit in &self.neurons {
            let mut signal = unit.bias;
            for (&w, &x) in unit.weights.iter().zip(inputs) {
                let product = graph.mul(w, x)?;
                signal = graph.add(signal, product)?;
            }
            if let Some(LayerActivation::Unit(activation)) = self.activation {
                signal = activation_op(graph, signal, activation)?;
            }
            outputs.push(signal);
        }

        match self.activation {
            Some(LayerActivation::Softmax) => softmax(graph, &outputs),
            _ => Ok(outputs),
        }
    }

    fn parameters(&self) -> Vec<NodeId> {
        self.neurons
            .iter()
            .flat_map(|unit| unit.weights.iter().copied().chain(std::iter::once(unit.bias)))
            .collect()
    }

    fn output_width(&self) -> Option<usize> {
        Some(self.units)
    }

    fn describe(&self) -> String {
        let mut description = format!("Dense(units={}", self.units);
        if let Some(activation) = self.activation {
            description.push_str(&format!(", activation={}", activation));
        }
        description.push_str(&format!(", initializer={})", self.initializer));
        description
    }
}

#[cfg(test)]
#[path = "dense_test.rs"]
mod tests;
