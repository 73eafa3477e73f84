// kaitorch-core/src/ops/arithmetic/add.rs

use crate::autograd::OpKind;
use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::ops::{apply_binary_op, Operand};

/// Adds two scalars: \( y = a + b \).
///
/// Both local derivatives are 1, so the backward rule passes the upstream
/// gradient through unchanged to each operand. Plain numbers are promoted to
/// leaves.
pub fn add_op(
    graph: &mut Graph,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
) -> Result<NodeId, KaiTorchError> {
    apply_binary_op(graph, a.into(), b.into(), |a, b| a + b, OpKind::Add)
}

impl Graph {
    /// See [`add_op`].
    pub fn add(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Result<NodeId, KaiTorchError> {
        add_op(self, a, b)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
