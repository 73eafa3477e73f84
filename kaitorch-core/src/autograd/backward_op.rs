use crate::graph::{Graph, NodeId};
use crate::ops::activation::Activation;
use crate::ops::EPSILON;
use std::fmt;

/// The operation that produced a node.
///
/// The variant, together with the values stored in the arena, carries
/// everything the backward rule needs: operand values are read from the
/// inputs, the result value from the node itself, and constants (the power
/// exponent, activation hyperparameters) live inside the variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OpKind {
    /// User-supplied constant or parameter. Has no backward rule.
    Leaf,
    /// `a + b`
    Add,
    /// `a * b`
    Mul,
    /// `(a + ε)^exponent`
    Pow { exponent: f64 },
    /// `e^a`
    Exp,
    /// `ln(a + ε)`
    Ln,
    /// Closed-form activation applied to a single input.
    Activation(Activation),
}

impl OpKind {
    /// Introspection tag, empty for leaves.
    pub fn tag(&self) -> String {
        match self {
            OpKind::Leaf => String::new(),
            OpKind::Add => "+".to_string(),
            OpKind::Mul => "*".to_string(),
            OpKind::Pow { exponent } => format!("**{}", exponent),
            OpKind::Exp => "exp".to_string(),
            OpKind::Ln => "ln".to_string(),
            OpKind::Activation(activation) => activation.name().to_string(),
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

/// Partial derivatives of a node w.r.t. each operand position.
///
/// `a` and `b` are the operand values (`b` is 0.0 for unary ops) and `out` is
/// the node's own value.
pub(crate) fn local_partials(op: &OpKind, a: f64, b: f64, out: f64) -> [f64; 2] {
    match op {
        OpKind::Leaf => [0.0, 0.0],
        OpKind::Add => [1.0, 1.0],
        OpKind::Mul => [b, a],
        OpKind::Pow { exponent } => [exponent * (a + EPSILON).powf(exponent - 1.0), 0.0],
        OpKind::Exp => [out, 0.0],
        OpKind::Ln => [1.0 / (a + EPSILON), 0.0],
        OpKind::Activation(activation) => [activation.derivative(a, out), 0.0],
    }
}

/// Runs the backward rule of node `id`: pushes `adjoints[id] * ∂out/∂input`
/// into the adjoint of every input, one contribution per operand position.
///
/// `adjoints` is indexed by node and only holds this pass's contributions;
/// stored `grad`s are not read. `id` must come from a topological order of
/// this graph, so it is in bounds and so are its inputs.
pub(crate) fn propagate(graph: &Graph, id: NodeId, adjoints: &mut [f64]) {
    let node = &graph.nodes[id.index()];
    if node.op == OpKind::Leaf {
        return;
    }
    let upstream = adjoints[id.index()];
    let mut operands = [0.0_f64; 2];
    for (slot, input) in operands.iter_mut().zip(node.inputs.iter()) {
        *slot = graph.nodes[input.index()].value;
    }
    let partials = local_partials(&node.op, operands[0], operands[1], node.value);

    for (input, partial) in node.inputs.iter().zip(partials) {
        adjoints[input.index()] += upstream * partial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tags() {
        assert_eq!(OpKind::Leaf.tag(), "");
        assert_eq!(OpKind::Add.tag(), "+");
        assert_eq!(OpKind::Mul.tag(), "*");
        assert_eq!(OpKind::Pow { exponent: 2.0 }.tag(), "**2");
        assert_eq!(OpKind::Pow { exponent: -1.0 }.tag(), "**-1");
        assert_eq!(OpKind::Exp.tag(), "exp");
        assert_eq!(OpKind::Ln.tag(), "ln");
        assert_eq!(OpKind::Activation(Activation::Sigmoid).tag(), "sigmoid");
    }

    #[test]
    fn test_local_partials() {
        assert_eq!(local_partials(&OpKind::Add, 3.0, 4.0, 7.0), [1.0, 1.0]);
        assert_eq!(local_partials(&OpKind::Mul, 3.0, 4.0, 12.0), [4.0, 3.0]);
        assert_eq!(local_partials(&OpKind::Exp, 1.0, 0.0, 2.5), [2.5, 0.0]);

        let [d_pow, _] = local_partials(&OpKind::Pow { exponent: 3.0 }, 2.0, 0.0, 8.0);
        assert_relative_eq!(d_pow, 3.0 * (2.0 + EPSILON).powf(2.0), epsilon = 1e-12);

        let [d_ln, _] = local_partials(&OpKind::Ln, 4.0, 0.0, 4.0_f64.ln());
        assert_relative_eq!(d_ln, 1.0 / (4.0 + EPSILON), epsilon = 1e-12);
    }
}
