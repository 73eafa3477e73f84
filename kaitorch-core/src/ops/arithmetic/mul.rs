// kaitorch-core/src/ops/arithmetic/mul.rs

use crate::autograd::OpKind;
use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::ops::{apply_binary_op, Operand};

/// Multiplies two scalars: \( y = a \cdot b \).
///
/// Backward: \( \frac{dL}{da} = \frac{dL}{dy} \cdot b \) and
/// \( \frac{dL}{db} = \frac{dL}{dy} \cdot a \), using the operand values at the
/// time backward runs.
pub fn mul_op(
    graph: &mut Graph,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
) -> Result<NodeId, KaiTorchError> {
    apply_binary_op(graph, a.into(), b.into(), |a, b| a * b, OpKind::Mul)
}

impl Graph {
    /// See [`mul_op`].
    pub fn mul(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Result<NodeId, KaiTorchError> {
        mul_op(self, a, b)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
