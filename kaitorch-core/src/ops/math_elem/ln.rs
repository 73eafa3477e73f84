// kaitorch-core/src/ops/math_elem/ln.rs

use crate::autograd::OpKind;
use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::ops::{apply_unary_op, Operand, EPSILON};

/// Computes the natural logarithm \( y = \ln(a + \epsilon) \).
///
/// The ε offset keeps `log(0)` finite (about -18.42) instead of returning
/// `-inf`. Negative inputs still produce NaN; they are not rejected.
///
/// Backward: \( \frac{dL}{da} = \frac{dL}{dy} \cdot \frac{1}{a + \epsilon} \).
pub fn ln_op(graph: &mut Graph, a: impl Into<Operand>) -> Result<NodeId, KaiTorchError> {
    apply_unary_op(graph, a.into(), |a| (a + EPSILON).ln(), OpKind::Ln)
}

impl Graph {
    /// Natural logarithm, see [`ln_op`].
    pub fn log(&mut self, a: impl Into<Operand>) -> Result<NodeId, KaiTorchError> {
        ln_op(self, a)
    }
}

#[cfg(test)]
#[path = "ln_test.rs"]
mod tests;
