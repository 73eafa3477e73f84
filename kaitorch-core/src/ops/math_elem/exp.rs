// kaitorch-core/src/ops/math_elem/exp.rs

use crate::autograd::OpKind;
use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::ops::{apply_unary_op, Operand};

/// Computes \( y = e^a \).
///
/// The derivative is the result itself, so the backward rule reuses the
/// node's stored value instead of recomputing the exponential.
pub fn exp_op(graph: &mut Graph, a: impl Into<Operand>) -> Result<NodeId, KaiTorchError> {
    apply_unary_op(graph, a.into(), f64::exp, OpKind::Exp)
}

impl Graph {
    /// See [`exp_op`].
    pub fn exp(&mut self, a: impl Into<Operand>) -> Result<NodeId, KaiTorchError> {
        exp_op(self, a)
    }
}

#[cfg(test)]
#[path = "exp_test.rs"]
mod tests;
