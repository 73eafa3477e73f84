// kaitorch-core/src/ops/arithmetic/sub.rs

use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::ops::arithmetic::{add_op, neg_op};
use crate::ops::Operand;

/// Subtracts two scalars: \( y = a + (-b) \).
///
/// A node `b` is negated through [`neg_op`] first; a plain number `b` is
/// negated directly and added as a `-b` leaf. Derivatives: 1 w.r.t. `a`, -1
/// w.r.t. `b`.
pub fn sub_op(
    graph: &mut Graph,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
) -> Result<NodeId, KaiTorchError> {
    let a = a.into();
    match b.into() {
        Operand::Const(value) => add_op(graph, a, -value),
        Operand::Node(b) => {
            let neg_b = neg_op(graph, b)?;
            add_op(graph, a, neg_b)
        }
    }
}

impl Graph {
    /// See [`sub_op`].
    pub fn sub(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Result<NodeId, KaiTorchError> {
        sub_op(self, a, b)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "sub_test.rs"]
mod tests;
