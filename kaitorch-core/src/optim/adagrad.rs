use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::optim::optimizer_state::OptimizerState;
use crate::optim::optimizer_trait::{check_learning_rate, update_params, Optimizer};
use log::debug;

/// Hyperparameters of [`Adagrad`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdagradConfig {
    pub lr: f64,
    /// Added to `√v` in the denominator.
    pub epsilon: f64,
    pub decay_rate: f64,
}

impl Default for AdagradConfig {
    fn default() -> Self {
        AdagradConfig {
            lr: 0.01,
            epsilon: 1e-8,
            decay_rate: 1.0,
        }
    }
}

/// Adaptive gradient: `v ← v + g²`, `θ ← θ − lr·g / (√v + ε)`.
///
/// `v` never shrinks, so the effective step size of a parameter only decreases
/// over training.
#[derive(Debug, Clone)]
pub struct Adagrad {
    config: AdagradConfig,
    state: OptimizerState,
}

impl Adagrad {
    pub fn new(config: AdagradConfig) -> Result<Self, KaiTorchError> {
        check_learning_rate(config.lr, config.decay_rate)?;
        Ok(Adagrad {
            config,
            state: OptimizerState::new(),
        })
    }
}

impl Default for Adagrad {
    fn default() -> Self {
        Adagrad {
            config: AdagradConfig::default(),
            state: OptimizerState::new(),
        }
    }
}

impl Optimizer for Adagrad {
    fn name(&self) -> &'static str {
        "Adagrad"
    }

    fn step(&mut self, graph: &mut Graph, params: &[NodeId]) -> Result<(), KaiTorchError> {
        debug!("Adagrad: step over {} params, lr = {}", params.len(), self.config.lr);
        let AdagradConfig { lr, epsilon, .. } = self.config;
        update_params(graph, params, &mut self.state, |value, grad, slot| {
            slot.v += grad * grad;
            value - lr * grad / (slot.v.sqrt() + epsilon)
        })?;
        self.config.lr *= self.config.decay_rate;
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.config.lr
    }

    fn state(&self) -> &OptimizerState {
        &self.state
    }
}

#[cfg(test)]
#[path = "adagrad_test.rs"]
mod tests;
