use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::optim::optimizer_state::OptimizerState;
use crate::optim::optimizer_trait::{check_coefficient, check_learning_rate, update_params, Optimizer};
use log::debug;

/// Hyperparameters of [`RmsProp`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmsPropConfig {
    pub lr: f64,
    /// ρ, decay of the squared-gradient average.
    pub rho: f64,
    pub epsilon: f64,
    pub decay_rate: f64,
}

impl Default for RmsPropConfig {
    fn default() -> Self {
        RmsPropConfig {
            lr: 0.001,
            rho: 0.9,
            epsilon: 1e-8,
            decay_rate: 1.0,
        }
    }
}

/// Root mean square propagation:
/// `v ← ρ·v + (1−ρ)·g²`, `θ ← θ − lr·g / (√v + ε)`.
#[derive(Debug, Clone)]
pub struct RmsProp {
    config: RmsPropConfig,
    state: OptimizerState,
}

impl RmsProp {
    pub fn new(config: RmsPropConfig) -> Result<Self, KaiTorchError> {
        check_learning_rate(config.lr, config.decay_rate)?;
        check_coefficient("rho", config.rho)?;
        Ok(RmsProp {
            config,
            state: OptimizerState::new(),
        })
    }
}

impl Default for RmsProp {
    fn default() -> Self {
        RmsProp {
            config: RmsPropConfig::default(),
            state: OptimizerState::new(),
        }
    }
}

impl Optimizer for RmsProp {
    fn name(&self) -> &'static str {
        "RMSprop"
    }

    fn step(&mut self, graph: &mut Graph, params: &[NodeId]) -> Result<(), KaiTorchError> {
        debug!("RMSprop: step over {} params, lr = {}", params.len(), self.config.lr);
        let RmsPropConfig { lr, rho, epsilon, .. } = self.config;
        update_params(graph, params, &mut self.state, |value, grad, slot| {
            slot.v = rho * slot.v + (1.0 - rho) * grad * grad;
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
#[path = "rmsprop_test.rs"]
mod tests;
