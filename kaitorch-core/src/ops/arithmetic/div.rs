// kaitorch-core/src/ops/arithmetic/div.rs

use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::ops::arithmetic::{add_op, mul_op, pow_op};
use crate::ops::{Operand, EPSILON};

/// Divides two scalars.
///
/// A node divisor `b` is rewritten as \( a \cdot (b + \epsilon)^{-1} \). Since
/// `pow` adds its own ε to the base, the effective denominator is `b + 2ε`.
/// A plain-number divisor `c` is folded into a multiplication by
/// \( 1 / (c + \epsilon) \).
///
/// Division by zero never fails; it yields a large finite value.
pub fn div_op(
    graph: &mut Graph,
    a: impl Into<Operand>,
    b: impl Into<Operand>,
) -> Result<NodeId, KaiTorchError> {
    let a = a.into();
    match b.into() {
        Operand::Const(divisor) => mul_op(graph, a, 1.0 / (divisor + EPSILON)),
        Operand::Node(b) => {
            let shifted = add_op(graph, b, EPSILON)?;
            let inverse = pow_op(graph, shifted, -1.0)?;
            mul_op(graph, a, inverse)
        }
    }
}

impl Graph {
    /// See [`div_op`].
    pub fn div(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Result<NodeId, KaiTorchError> {
        div_op(self, a, b)
    }
}

// --- Tests ---
#[cfg(test)]
#[path = "div_test.rs"]
mod tests;
