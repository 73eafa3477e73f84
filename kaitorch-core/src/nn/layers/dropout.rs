// kaitorch-core/src/nn/layers/dropout.rs

use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::nn::module::Module;
use rand::RngCore;
use rand_distr::{Bernoulli, Distribution};

/// Randomly zeroes inputs during training.
///
/// Each input survives with probability `p = 1 - rate` and is then scaled by
/// `1 / p`, so the expected value is unchanged. Dropped inputs are replaced by
/// fresh 0.0 leaves, which cuts them out of the backward pass. Outside of
/// training the layer passes its inputs through untouched.
#[derive(Debug, Clone)]
pub struct Dropout {
    rate: f64,
    width: Option<usize>,
}

impl Dropout {
    /// # Errors
    /// [`KaiTorchError::InvalidDropoutRate`] unless `0 <= rate <= 1`.
    pub fn new(rate: f64) -> Result<Self, KaiTorchError> {
        if !(0.0..=1.0).contains(&rate) {
            return Err(KaiTorchError::InvalidDropoutRate(rate));
        }
        Ok(Dropout { rate, width: None })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Module for Dropout {
    fn build(&mut self, nin: usize, _graph: &mut Graph, _rng: &mut dyn RngCore) -> Result<(), KaiTorchError> {
        if self.width.is_none() {
            self.width = Some(nin);
        }
        Ok(())
    }

    fn is_built(&self) -> bool {
        self.width.is_some()
    }

    fn forward(
        &self,
        graph: &mut Graph,
        inputs: &[NodeId],
        train: bool,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<NodeId>, KaiTorchError> {
        let width = self.width.ok_or(KaiTorchError::ModelNotBuilt)?;
        if inputs.len() != width {
            return Err(KaiTorchError::ShapeMismatch {
                expected: width,
                actual: inputs.len(),
                operation: "Dropout::forward".to_string(),
            });
        }
        if !train {
            return Ok(inputs.to_vec());
        }

        let keep = 1.0 - self.rate;
        let mask = Bernoulli::new(keep).map_err(|_| KaiTorchError::InvalidDropoutRate(self.rate))?;
        let mut outputs = Vec::with_capacity(inputs.len());
        for &x in inputs {
            if mask.sample(rng) {
                outputs.push(graph.mul(x, 1.0 / keep)?);
            } else {
                outputs.push(graph.leaf(0.0));
            }
        }
        Ok(outputs)
    }

    fn parameters(&self) -> Vec<NodeId> {
        Vec::new()
    }

    fn output_width(&self) -> Option<usize> {
        self.width
    }

    fn describe(&self) -> String {
        format!("Dropout(dropout_rate={})", self.rate)
    }
}

#[cfg(test)]
#[path = "dropout_test.rs"]
mod tests;
