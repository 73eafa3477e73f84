// kaitorch-core/src/ops/activation/softmax.rs

use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};

/// Softmax over a list of nodes.
///
/// Built entirely from `sub`, `exp`, `add` and `div` nodes, so gradients flow
/// through the normalising sum as well as through each numerator. Inputs are
/// shifted by their (constant) maximum before exponentiating; the shift does
/// not change the result or its derivatives.
///
/// Because `div` stabilises its denominator with ε, outputs sum to 1 only up
/// to about 1e-8.
pub fn softmax(graph: &mut Graph, inputs: &[NodeId]) -> Result<Vec<NodeId>, KaiTorchError> {
    if inputs.is_empty() {
        return Err(KaiTorchError::EmptyInput("softmax".to_string()));
    }

    let mut max = f64::NEG_INFINITY;
    for &id in inputs {
        max = max.max(graph.value(id)?);
    }

    let mut exps = Vec::with_capacity(inputs.len());
    for &id in inputs {
        let shifted = graph.sub(id, max)?;
        exps.push(graph.exp(shifted)?);
    }

    let mut total = exps[0];
    for &e in &exps[1..] {
        total = graph.add(total, e)?;
    }

    exps.into_iter().map(|e| graph.div(e, total)).collect()
}

impl Graph {
    /// See [`softmax`].
    pub fn softmax(&mut self, inputs: &[NodeId]) -> Result<Vec<NodeId>, KaiTorchError> {
        softmax(self, inputs)
    }
}
