// kaitorch-core/src/nn/losses/crossentropy.rs

use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::nn::losses::{check_layout, sum_terms};

/// Per-entry crossentropy term: `-ln(ŷ)` for a target of 1, `-ln(1 - ŷ)` for
/// a target of 0. Any other target contributes nothing.
fn entry_term(graph: &mut Graph, target: f64, prediction: NodeId) -> Result<Option<NodeId>, KaiTorchError> {
    let log = if target == 1.0 {
        graph.log(prediction)?
    } else if target == 0.0 {
        let complement = graph.sub(1.0, prediction)?;
        graph.log(complement)?
    } else {
        return Ok(None);
    };
    graph.neg(log).map(Some)
}

fn crossentropy_sum(
    graph: &mut Graph,
    targets: &[Vec<f64>],
    predictions: &[Vec<NodeId>],
) -> Result<NodeId, KaiTorchError> {
    let mut terms = Vec::new();
    for (y, y_pred) in targets.iter().zip(predictions) {
        for (&target, &prediction) in y.iter().zip(y_pred) {
            if let Some(term) = entry_term(graph, target, prediction)? {
                terms.push(term);
            }
        }
    }
    sum_terms(graph, &terms)
}

/// Binary crossentropy averaged over every entry.
pub fn binary_crossentropy(
    graph: &mut Graph,
    targets: &[Vec<f64>],
    predictions: &[Vec<NodeId>],
) -> Result<NodeId, KaiTorchError> {
    let count = check_layout(targets, predictions, "binary_crossentropy")?;
    let total = crossentropy_sum(graph, targets, predictions)?;
    graph.div(total, count as f64)
}

/// Categorical crossentropy for one-hot targets, averaged over samples.
///
/// Each row is one sample; the per-entry term of every class is summed
/// (including the `-ln(1 - ŷ)` terms of the inactive classes), and the total
/// is divided by the number of rows.
pub fn categorical_crossentropy(
    graph: &mut Graph,
    targets: &[Vec<f64>],
    predictions: &[Vec<NodeId>],
) -> Result<NodeId, KaiTorchError> {
    check_layout(targets, predictions, "categorical_crossentropy")?;
    let total = crossentropy_sum(graph, targets, predictions)?;
    graph.div(total, targets.len() as f64)
}
