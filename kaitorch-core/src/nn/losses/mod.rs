// kaitorch-core/src/nn/losses/mod.rs

//! Loss functions built from ordinary graph nodes.
//!
//! Targets are plain numbers and predictions are node ids, one row per sample.
//! Single-output models use rows of length one.

use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::registry::Registered;
use std::fmt;

pub mod crossentropy;
pub mod mse;

pub use crossentropy::{binary_crossentropy, categorical_crossentropy};
pub use mse::mse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Loss {
    MeanSquaredError,
    BinaryCrossentropy,
    CategoricalCrossentropy,
}

impl Loss {
    pub fn name(&self) -> &'static str {
        match self {
            Loss::MeanSquaredError => "mse",
            Loss::BinaryCrossentropy => "binary_crossentropy",
            Loss::CategoricalCrossentropy => "categorical_crossentropy",
        }
    }

    /// Builds the loss node for `predictions` against `targets`.
    pub fn compute(
        &self,
        graph: &mut Graph,
        targets: &[Vec<f64>],
        predictions: &[Vec<NodeId>],
    ) -> Result<NodeId, KaiTorchError> {
        match self {
            Loss::MeanSquaredError => mse(graph, targets, predictions),
            Loss::BinaryCrossentropy => binary_crossentropy(graph, targets, predictions),
            Loss::CategoricalCrossentropy => categorical_crossentropy(graph, targets, predictions),
        }
    }
}

impl fmt::Display for Loss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Registered for Loss {
    fn defaults() -> Vec<(&'static str, fn() -> Self)> {
        vec![
            ("mse", || Loss::MeanSquaredError),
            ("binary_crossentropy", || Loss::BinaryCrossentropy),
            ("categorical_crossentropy", || Loss::CategoricalCrossentropy),
        ]
    }

    fn unknown(name: &str, available: Vec<String>) -> KaiTorchError {
        KaiTorchError::UnknownLoss {
            name: name.to_string(),
            available,
        }
    }
}

/// Checks that targets and predictions have the same layout and returns the
/// total number of entries.
pub(crate) fn check_layout(
    targets: &[Vec<f64>],
    predictions: &[Vec<NodeId>],
    operation: &str,
) -> Result<usize, KaiTorchError> {
    if targets.is_empty() {
        return Err(KaiTorchError::EmptyInput(operation.to_string()));
    }
    if targets.len() != predictions.len() {
        return Err(KaiTorchError::ShapeMismatch {
            expected: targets.len(),
            actual: predictions.len(),
            operation: operation.to_string(),
        });
    }
    let mut total = 0;
    for (y, y_pred) in targets.iter().zip(predictions) {
        if y.len() != y_pred.len() {
            return Err(KaiTorchError::ShapeMismatch {
                expected: y.len(),
                actual: y_pred.len(),
                operation: operation.to_string(),
            });
        }
        total += y.len();
    }
    if total == 0 {
        return Err(KaiTorchError::EmptyInput(operation.to_string()));
    }
    Ok(total)
}

/// Sums `terms` into a chain of add nodes; no terms gives a 0.0 leaf.
pub(crate) fn sum_terms(graph: &mut Graph, terms: &[NodeId]) -> Result<NodeId, KaiTorchError> {
    let Some((&first, rest)) = terms.split_first() else {
        return Ok(graph.leaf(0.0));
    };
    let mut total = first;
    for &term in rest {
        total = graph.add(total, term)?;
    }
    Ok(total)
}

#[cfg(test)]
#[path = "losses_test.rs"]
mod tests;
