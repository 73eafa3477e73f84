// kaitorch-core/src/ops/arithmetic/neg.rs

use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::ops::arithmetic::mul_op;
use crate::ops::Operand;

/// Negates a scalar: \( y = -a \).
///
/// Built as `a * -1`, so the result is a multiply node whose second parent is
/// a `-1` leaf; the derivative w.r.t. `a` is -1.
pub fn neg_op(graph: &mut Graph, a: impl Into<Operand>) -> Result<NodeId, KaiTorchError> {
    mul_op(graph, a, -1.0)
}

impl Graph {
    /// See [`neg_op`].
    pub fn neg(&mut self, a: impl Into<Operand>) -> Result<NodeId, KaiTorchError> {
        neg_op(self, a)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "neg_test.rs"]
mod tests;
