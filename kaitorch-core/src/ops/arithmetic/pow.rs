// kaitorch-core/src/ops/arithmetic/pow.rs

use crate::autograd::OpKind;
use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::ops::{apply_unary_op, Operand, EPSILON};

/// Raises a scalar to a constant power: \( y = (a + \epsilon)^b \).
///
/// The exponent must be a plain number; passing a node fails with
/// [`KaiTorchError::InvalidExponent`] before anything is added to the graph.
///
/// ε is added to the base, never to the result, so negative exponents of a
/// zero base stay finite. Backward:
/// \( \frac{dL}{da} = \frac{dL}{dy} \cdot b (a + \epsilon)^{b-1} \).
pub fn pow_op(
    graph: &mut Graph,
    base: impl Into<Operand>,
    exponent: impl Into<Operand>,
) -> Result<NodeId, KaiTorchError> {
    let exponent = match exponent.into() {
        Operand::Const(value) => value,
        Operand::Node(id) => return Err(KaiTorchError::InvalidExponent(id)),
    };
    apply_unary_op(
        graph,
        base.into(),
        |a| (a + EPSILON).powf(exponent),
        OpKind::Pow { exponent },
    )
}

impl Graph {
    /// See [`pow_op`].
    pub fn pow(
        &mut self,
        base: impl Into<Operand>,
        exponent: impl Into<Operand>,
    ) -> Result<NodeId, KaiTorchError> {
        pow_op(self, base, exponent)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "pow_test.rs"]
mod tests;
