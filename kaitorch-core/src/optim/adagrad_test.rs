use super::*;
use approx::assert_relative_eq;

#[test]
fn test_adagrad_accumulates_squared_gradients() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let p = graph.leaf(1.0);
    let mut optimizer = Adagrad::new(AdagradConfig {
        lr: 0.5,
        epsilon: 0.0,
        decay_rate: 1.0,
    })?;

    graph.set_grad(p, 3.0)?;
    optimizer.step(&mut graph, &[p])?;
    // v = 9, step = 0.5 * 3 / 3
    assert_relative_eq!(optimizer.state().get(p).unwrap().v, 9.0);
    assert_relative_eq!(graph.value(p)?, 0.5, epsilon = 1e-12);

    graph.set_grad(p, 4.0)?;
    optimizer.step(&mut graph, &[p])?;
    // v = 25, step = 0.5 * 4 / 5
    assert_relative_eq!(optimizer.state().get(p).unwrap().v, 25.0);
    assert_relative_eq!(graph.value(p)?, 0.1, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_adagrad_zero_gradient_is_stable() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let p = graph.leaf(2.0);
    let mut optimizer = Adagrad::default();

    optimizer.step(&mut graph, &[p])?;
    assert_eq!(graph.value(p)?, 2.0);
    assert_eq!(optimizer.name(), "Adagrad");
    Ok(())
}
