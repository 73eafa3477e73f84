use crate::autograd::OpKind;
use crate::error::KaiTorchError;
use crate::graph::Graph;
use crate::ops::arithmetic::mul_op;
use approx::assert_relative_eq;

#[test]
fn test_mul_forward() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let a = graph.leaf(2.0);
    let b = graph.leaf(-3.0);
    let y = mul_op(&mut graph, a, b)?;

    assert_relative_eq!(graph.value(y)?, -6.0);
    assert_eq!(*graph.op(y)?, OpKind::Mul);
    assert_eq!(graph.op(y)?.tag(), "*");
    Ok(())
}

#[test]
fn test_mul_product_rule() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let a = graph.leaf(2.0);
    let b = graph.leaf(-3.0);
    let y = graph.mul(a, b)?;
    graph.backward(y)?;

    assert_relative_eq!(graph.grad(a)?, -3.0);
    assert_relative_eq!(graph.grad(b)?, 2.0);
    Ok(())
}

#[test]
fn test_mul_square_accumulates_both_positions() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let x = graph.leaf(3.0);
    let y = graph.mul(x, x)?;

    assert_eq!(graph.parents(y)?, vec![x]);
    graph.backward(y)?;
    assert_relative_eq!(graph.grad(x)?, 6.0);
    Ok(())
}

#[test]
fn test_mul_by_constant() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let x = graph.leaf(4.0);
    let y = graph.mul(x, 0.25)?;
    graph.backward(y)?;

    assert_relative_eq!(graph.value(y)?, 1.0);
    assert_relative_eq!(graph.grad(x)?, 0.25);
    Ok(())
}
