// kaitorch-core/src/nn/losses/mse.rs

use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::nn::losses::{check_layout, sum_terms};

/// Mean squared error over every entry: \( \frac{1}{N} \sum (y - \hat{y})^2 \).
///
/// `N` counts entries, not samples, so multi-output rows are averaged
/// per entry. Squaring goes through `pow`, whose ε offset makes the result
/// differ from the exact value by about 1e-8.
pub fn mse(
    graph: &mut Graph,
    targets: &[Vec<f64>],
    predictions: &[Vec<NodeId>],
) -> Result<NodeId, KaiTorchError> {
    let count = check_layout(targets, predictions, "mse")?;

    let mut squares = Vec::with_capacity(count);
    for (y, y_pred) in targets.iter().zip(predictions) {
        for (&target, &prediction) in y.iter().zip(y_pred) {
            let error = graph.sub(target, prediction)?;
            squares.push(graph.pow(error, 2.0)?);
        }
    }
    let total = sum_terms(graph, &squares)?;
    graph.div(total, count as f64)
}
