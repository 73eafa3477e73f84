use crate::graph::NodeId;
use std::collections::HashMap;

/// Per-parameter moment estimates.
///
/// `m` is the first-moment (momentum) buffer and `v` the second-moment
/// (squared gradient) buffer. Optimizers only touch the fields they use.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParamState {
    pub m: f64,
    pub v: f64,
}

/// State an optimizer keeps between steps, keyed by parameter id.
///
/// Parameters are registered lazily the first time a step sees them, starting
/// from zeroed moments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptimizerState {
    params: HashMap<NodeId, ParamState>,
    steps: u64,
}

impl OptimizerState {
    pub fn new() -> Self {
        OptimizerState::default()
    }

    /// State of `id`, if a step has already touched it.
    pub fn get(&self, id: NodeId) -> Option<&ParamState> {
        self.params.get(&id)
    }

    pub(crate) fn entry(&mut self, id: NodeId) -> &mut ParamState {
        self.params.entry(id).or_default()
    }

    /// Number of completed `step` calls.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub(crate) fn record_step(&mut self) {
        self.steps += 1;
    }

    /// Number of parameters with recorded state.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Forgets every moment estimate and the step count.
    pub fn clear(&mut self) {
        self.params.clear();
        self.steps = 0;
    }
}
