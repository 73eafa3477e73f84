use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::optim::optimizer_state::{OptimizerState, ParamState};
use std::fmt::Debug;

/// Common interface of every optimizer.
///
/// An optimizer reads the accumulated `grad` of each parameter leaf and
/// writes a new `value`. It never clears gradients on its own: callers zero
/// them (usually through [`Optimizer::zero_grad`]) before the next backward
/// pass.
pub trait Optimizer: Debug {
    /// Registry name, e.g. `"Adam"`.
    fn name(&self) -> &'static str;

    /// Updates every parameter in `params` once, then decays the learning
    /// rate by the configured factor.
    fn step(&mut self, graph: &mut Graph, params: &[NodeId]) -> Result<(), KaiTorchError>;

    /// Resets the gradient of every parameter in `params` to 0.0.
    fn zero_grad(&self, graph: &mut Graph, params: &[NodeId]) -> Result<(), KaiTorchError> {
        graph.zero_grad(params)
    }

    /// Learning rate the next step will use.
    fn learning_rate(&self) -> f64;

    fn state(&self) -> &OptimizerState;
}

/// Applies `rule(value, grad, state)` to every parameter and stores the
/// returned value. Shared by all optimizers.
pub(crate) fn update_params<F>(
    graph: &mut Graph,
    params: &[NodeId],
    state: &mut OptimizerState,
    mut rule: F,
) -> Result<(), KaiTorchError>
where
    F: FnMut(f64, f64, &mut ParamState) -> f64,
{
    for &id in params {
        let value = graph.value(id)?;
        let grad = graph.grad(id)?;
        let updated = rule(value, grad, state.entry(id));
        graph.set_value(id, updated)?;
    }
    state.record_step();
    Ok(())
}

/// Checks that `lr` is a usable learning rate.
pub(crate) fn check_learning_rate(lr: f64, decay_rate: f64) -> Result<(), KaiTorchError> {
    if lr <= 0.0 || !lr.is_finite() {
        return Err(KaiTorchError::InvalidArgument(format!(
            "learning rate must be positive and finite, got {}",
            lr
        )));
    }
    if decay_rate <= 0.0 || !decay_rate.is_finite() {
        return Err(KaiTorchError::InvalidArgument(format!(
            "decay rate must be positive and finite, got {}",
            decay_rate
        )));
    }
    Ok(())
}

/// Checks that a moving-average coefficient lies in [0, 1).
pub(crate) fn check_coefficient(name: &str, value: f64) -> Result<(), KaiTorchError> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(KaiTorchError::InvalidArgument(format!(
            "{} must be in [0, 1), got {}",
            name, value
        )))
    }
}
