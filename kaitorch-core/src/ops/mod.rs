//! # Scalar Operations Module (`ops`)
//!
//! Every operation builds one or more nodes in a [`Graph`] and returns the id of
//! the result. Operations are grouped into submodules:
//!
//! - [`arithmetic`]: add, mul, neg, sub, div, pow.
//! - [`math_elem`]: exp, ln.
//! - [`activation`]: sigmoid, tanh, the ReLU family, swish and softmax.
//!
//! Each operation has a free `xxx_op` function and a matching method on
//! `Graph`. Operands are taken as `impl Into<Operand>`, so a plain `f64` can be
//! passed anywhere a node is expected; it is promoted to a fresh leaf.

use crate::autograd::OpKind;
use crate::error::KaiTorchError;
use crate::graph::{Graph, Inputs, NodeId};

pub mod activation;
pub mod arithmetic;
pub mod math_elem;

/// Offset added to the base of power and log, and to divisors, so that
/// division by zero and log of zero stay finite.
pub const EPSILON: f64 = 1e-8;

/// Either an existing node or a plain number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Node(NodeId),
    Const(f64),
}

impl From<NodeId> for Operand {
    fn from(id: NodeId) -> Self {
        Operand::Node(id)
    }
}

impl From<&NodeId> for Operand {
    fn from(id: &NodeId) -> Self {
        Operand::Node(*id)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Const(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Const(value as f64)
    }
}

impl Graph {
    /// Turns an operand into a node id, creating a leaf for plain numbers.
    pub(crate) fn resolve(&mut self, operand: Operand) -> Result<NodeId, KaiTorchError> {
        match operand {
            Operand::Node(id) => {
                self.check(id)?;
                Ok(id)
            }
            Operand::Const(value) => Ok(self.leaf(value)),
        }
    }
}

/// Builds a single-input node: resolves `a`, applies `forward` to its value.
pub(crate) fn apply_unary_op<F>(
    graph: &mut Graph,
    a: Operand,
    forward: F,
    op: OpKind,
) -> Result<NodeId, KaiTorchError>
where
    F: Fn(f64) -> f64,
{
    let a = graph.resolve(a)?;
    let value = forward(graph.nodes[a.index()].value);
    Ok(graph.push(value, op, Inputs::Unary(a)))
}

/// Builds a two-input node: resolves both operands, applies `forward`.
pub(crate) fn apply_binary_op<F>(
    graph: &mut Graph,
    a: Operand,
    b: Operand,
    forward: F,
    op: OpKind,
) -> Result<NodeId, KaiTorchError>
where
    F: Fn(f64, f64) -> f64,
{
    let a = graph.resolve(a)?;
    let b = graph.resolve(b)?;
    let value = forward(graph.nodes[a.index()].value, graph.nodes[b.index()].value);
    Ok(graph.push(value, op, Inputs::Binary(a, b)))
}
