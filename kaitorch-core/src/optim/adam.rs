use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::optim::optimizer_state::OptimizerState;
use crate::optim::optimizer_trait::{check_coefficient, check_learning_rate, update_params, Optimizer};
use log::debug;

/// Hyperparameters of [`Adam`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamConfig {
    pub lr: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    pub decay_rate: f64,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig {
            lr: 0.001,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            decay_rate: 1.0,
        }
    }
}

/// Adaptive moment estimation.
///
/// ```text
/// m ← β1·m + (1−β1)·g
/// v ← β2·v + (1−β2)·g²
/// m̂ = m / (1−β1)
/// v̂ = v / (1−β2)
/// θ ← θ − lr·m̂ / (√v̂ + ε)
/// ```
///
/// The bias correction divides by the constant `1 − β` rather than
/// `1 − βᵗ`, so it does not fade out as training goes on.
#[derive(Debug, Clone)]
pub struct Adam {
    config: AdamConfig,
    state: OptimizerState,
}

impl Adam {
    pub fn new(config: AdamConfig) -> Result<Self, KaiTorchError> {
        check_learning_rate(config.lr, config.decay_rate)?;
        check_coefficient("beta1", config.beta1)?;
        check_coefficient("beta2", config.beta2)?;
        Ok(Adam {
            config,
            state: OptimizerState::new(),
        })
    }
}

impl Default for Adam {
    fn default() -> Self {
        Adam {
            config: AdamConfig::default(),
            state: OptimizerState::new(),
        }
    }
}

impl Optimizer for Adam {
    fn name(&self) -> &'static str {
        "Adam"
    }

    fn step(&mut self, graph: &mut Graph, params: &[NodeId]) -> Result<(), KaiTorchError> {
        debug!("Adam: step over {} params, lr = {}", params.len(), self.config.lr);
        let AdamConfig {
            lr,
            beta1,
            beta2,
            epsilon,
            ..
        } = self.config;
        update_params(graph, params, &mut self.state, |value, grad, slot| {
            slot.m = beta1 * slot.m + (1.0 - beta1) * grad;
            slot.v = beta2 * slot.v + (1.0 - beta2) * grad * grad;
            let m_hat = slot.m / (1.0 - beta1);
            let v_hat = slot.v / (1.0 - beta2);
            value - lr * m_hat / (v_hat.sqrt() + epsilon)
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
#[path = "adam_test.rs"]
mod tests;
