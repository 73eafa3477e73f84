use crate::autograd::OpKind;
use crate::error::KaiTorchError;
use crate::graph::Graph;
use approx::assert_relative_eq;

#[test]
fn test_neg_forward_and_backward() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let a = graph.leaf(2.5);
    let y = graph.neg(a)?;

    assert_relative_eq!(graph.value(y)?, -2.5);
    assert_eq!(*graph.op(y)?, OpKind::Mul);

    graph.backward(y)?;
    assert_relative_eq!(graph.grad(a)?, -1.0);
    Ok(())
}

#[test]
fn test_double_negation() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let a = graph.leaf(-7.0);
    let once = graph.neg(a)?;
    let twice = graph.neg(once)?;
    graph.backward(twice)?;

    assert_relative_eq!(graph.value(twice)?, -7.0);
    assert_relative_eq!(graph.grad(a)?, 1.0);
    Ok(())
}
