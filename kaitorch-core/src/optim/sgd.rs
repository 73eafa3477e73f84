use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::optim::optimizer_state::OptimizerState;
use crate::optim::optimizer_trait::{check_coefficient, check_learning_rate, update_params, Optimizer};
use log::debug;

/// Hyperparameters of [`Sgd`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdConfig {
    pub lr: f64,
    /// Factor applied to `lr` after every step; 1.0 disables decay.
    pub decay_rate: f64,
}

impl Default for SgdConfig {
    fn default() -> Self {
        SgdConfig {
            lr: 0.01,
            decay_rate: 1.0,
        }
    }
}

/// Plain stochastic gradient descent: `θ ← θ − lr·g`.
#[derive(Debug, Clone)]
pub struct Sgd {
    lr: f64,
    decay_rate: f64,
    state: OptimizerState,
}

impl Sgd {
    pub fn new(config: SgdConfig) -> Result<Self, KaiTorchError> {
        check_learning_rate(config.lr, config.decay_rate)?;
        Ok(Sgd {
            lr: config.lr,
            decay_rate: config.decay_rate,
            state: OptimizerState::new(),
        })
    }
}

impl Default for Sgd {
    fn default() -> Self {
        let config = SgdConfig::default();
        Sgd {
            lr: config.lr,
            decay_rate: config.decay_rate,
            state: OptimizerState::new(),
        }
    }
}

impl Optimizer for Sgd {
    fn name(&self) -> &'static str {
        "SGD"
    }

    fn step(&mut self, graph: &mut Graph, params: &[NodeId]) -> Result<(), KaiTorchError> {
        debug!("SGD: step over {} params, lr = {}", params.len(), self.lr);
        let lr = self.lr;
        update_params(graph, params, &mut self.state, |value, grad, _| value - lr * grad)?;
        self.lr *= self.decay_rate;
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }

    fn state(&self) -> &OptimizerState {
        &self.state
    }
}

/// Hyperparameters of [`Momentum`] and [`Nesterov`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumConfig {
    pub lr: f64,
    /// η, weight of the previous momentum buffer.
    pub momentum: f64,
    pub decay_rate: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        MomentumConfig {
            lr: 0.01,
            momentum: 0.9,
            decay_rate: 1.0,
        }
    }
}

fn check_momentum_config(config: &MomentumConfig) -> Result<(), KaiTorchError> {
    check_learning_rate(config.lr, config.decay_rate)?;
    check_coefficient("momentum", config.momentum)
}

/// SGD with an exponential moving average of gradients:
/// `m ← η·m + (1−η)·g`, `θ ← θ − lr·m`.
#[derive(Debug, Clone)]
pub struct Momentum {
    lr: f64,
    momentum: f64,
    decay_rate: f64,
    state: OptimizerState,
}

impl Momentum {
    pub fn new(config: MomentumConfig) -> Result<Self, KaiTorchError> {
        check_momentum_config(&config)?;
        Ok(Momentum {
            lr: config.lr,
            momentum: config.momentum,
            decay_rate: config.decay_rate,
            state: OptimizerState::new(),
        })
    }
}

impl Default for Momentum {
    fn default() -> Self {
        let config = MomentumConfig::default();
        Momentum {
            lr: config.lr,
            momentum: config.momentum,
            decay_rate: config.decay_rate,
            state: OptimizerState::new(),
        }
    }
}

impl Optimizer for Momentum {
    fn name(&self) -> &'static str {
        "Momentum"
    }

    fn step(&mut self, graph: &mut Graph, params: &[NodeId]) -> Result<(), KaiTorchError> {
        debug!("Momentum: step over {} params, lr = {}", params.len(), self.lr);
        let (lr, eta) = (self.lr, self.momentum);
        update_params(graph, params, &mut self.state, |value, grad, slot| {
            slot.m = eta * slot.m + (1.0 - eta) * grad;
            value - lr * slot.m
        })?;
        self.lr *= self.decay_rate;
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }

    fn state(&self) -> &OptimizerState {
        &self.state
    }
}

/// Nesterov accelerated gradient:
/// `m ← η·m − lr·g`, `θ ← θ + η·m − lr·g`.
#[derive(Debug, Clone)]
pub struct Nesterov {
    lr: f64,
    momentum: f64,
    decay_rate: f64,
    state: OptimizerState,
}

impl Nesterov {
    pub fn new(config: MomentumConfig) -> Result<Self, KaiTorchError> {
        check_momentum_config(&config)?;
        Ok(Nesterov {
            lr: config.lr,
            momentum: config.momentum,
            decay_rate: config.decay_rate,
            state: OptimizerState::new(),
        })
    }
}

impl Default for Nesterov {
    fn default() -> Self {
        let config = MomentumConfig::default();
        Nesterov {
            lr: config.lr,
            momentum: config.momentum,
            decay_rate: config.decay_rate,
            state: OptimizerState::new(),
        }
    }
}

impl Optimizer for Nesterov {
    fn name(&self) -> &'static str {
        "Nesterov"
    }

    fn step(&mut self, graph: &mut Graph, params: &[NodeId]) -> Result<(), KaiTorchError> {
        debug!("Nesterov: step over {} params, lr = {}", params.len(), self.lr);
        let (lr, eta) = (self.lr, self.momentum);
        update_params(graph, params, &mut self.state, |value, grad, slot| {
            slot.m = eta * slot.m - lr * grad;
            value + eta * slot.m - lr * grad
        })?;
        self.lr *= self.decay_rate;
        Ok(())
    }

    fn learning_rate(&self) -> f64 {
        self.lr
    }

    fn state(&self) -> &OptimizerState {
        &self.state
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
