use super::*;
use crate::nn::init::Initializer;
use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn built(layer: Dense, nin: usize, graph: &mut Graph) -> Result<Dense, KaiTorchError> {
    let mut layer = layer;
    let mut rng = StdRng::seed_from_u64(11);
    layer.build(nin, graph, &mut rng)?;
    Ok(layer)
}

/// Overwrites every parameter of `layer` with `values`, in `parameters()` order.
fn set_parameters(graph: &mut Graph, layer: &Dense, values: &[f64]) -> Result<(), KaiTorchError> {
    for (id, &v) in layer.parameters().into_iter().zip(values) {
        graph.set_value(id, v)?;
    }
    Ok(())
}

#[test]
fn test_dense_build_creates_parameter_leaves() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let layer = built(Dense::new(2), 3, &mut graph)?;

    assert!(layer.is_built());
    assert_eq!(layer.parameters().len(), 2 * 3 + 2);
    assert_eq!(graph.len(), 8);
    assert_eq!(layer.weights(0).map(|w| w.len()), Some(3));
    assert!(layer.bias(1).is_some());
    assert!(layer.bias(2).is_none());

    let limit = (6.0_f64 / 5.0).sqrt();
    for id in layer.parameters() {
        assert!(graph.value(id)?.abs() <= limit);
    }
    Ok(())
}

#[test]
fn test_dense_build_is_idempotent() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let mut layer = built(Dense::new(2), 3, &mut graph)?;
    let before = layer.parameters();

    let mut rng = StdRng::seed_from_u64(99);
    layer.build(5, &mut graph, &mut rng)?;
    assert_eq!(layer.parameters(), before);
    assert_eq!(graph.len(), 8);
    Ok(())
}

#[test]
fn test_dense_forward_linear() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let layer = built(Dense::new(2), 2, &mut graph)?;
    // unit 0: w = [1, -1], b = 0.5 ; unit 1: w = [2, 3], b = -1
    set_parameters(&mut graph, &layer, &[1.0, -1.0, 0.5, 2.0, 3.0, -1.0])?;

    let x = [graph.leaf(3.0), graph.leaf(1.0)];
    let mut rng = StdRng::seed_from_u64(0);
    let out = layer.forward(&mut graph, &x, false, &mut rng)?;

    assert_eq!(out.len(), 2);
    assert_relative_eq!(graph.value(out[0])?, 2.5);
    assert_relative_eq!(graph.value(out[1])?, 8.0);

    graph.backward(out[1])?;
    let params = layer.parameters();
    assert_relative_eq!(graph.grad(params[3])?, 3.0);
    assert_relative_eq!(graph.grad(params[4])?, 1.0);
    assert_relative_eq!(graph.grad(params[5])?, 1.0);
    assert_relative_eq!(graph.grad(x[0])?, 2.0);
    assert_eq!(graph.grad(params[0])?, 0.0);
    Ok(())
}

#[test]
fn test_dense_unit_activation() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let layer = built(Dense::new(2).with_activation(Activation::Relu), 1, &mut graph)?;
    set_parameters(&mut graph, &layer, &[1.0, 0.0, -1.0, 0.0])?;

    let x = [graph.leaf(2.0)];
    let mut rng = StdRng::seed_from_u64(0);
    let out = layer.forward(&mut graph, &x, false, &mut rng)?;
    assert_relative_eq!(graph.value(out[0])?, 2.0);
    assert_relative_eq!(graph.value(out[1])?, 0.0);
    Ok(())
}

#[test]
fn test_dense_softmax_outputs_sum_to_one() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let registry = Registry::with_defaults();
    let layer = built(Dense::new(3).with_activation_name("softmax", &registry)?, 2, &mut graph)?;
    assert_eq!(layer.activation(), Some(LayerActivation::Softmax));

    let x = [graph.leaf(0.3), graph.leaf(-1.2)];
    let mut rng = StdRng::seed_from_u64(0);
    let out = layer.forward(&mut graph, &x, false, &mut rng)?;
    let total: f64 = out.iter().map(|&id| graph.value(id)).sum::<Result<f64, _>>()?;
    assert_relative_eq!(total, 1.0, epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_dense_names_resolve_through_registries() -> Result<(), KaiTorchError> {
    let activations = Registry::with_defaults();
    let initializers = Registry::with_defaults();
    let layer = Dense::new(4)
        .with_activation_name("tanh", &activations)?
        .with_initializer_name("he_normal", &initializers)?;

    assert_eq!(layer.activation(), Some(LayerActivation::Unit(Activation::Tanh)));
    assert_eq!(layer.initializer(), Initializer::HeNormal);
    assert_eq!(
        layer.describe(),
        "Dense(units=4, activation=tanh, initializer=he_normal)"
    );

    assert!(matches!(
        Dense::new(1).with_activation_name("mish", &activations),
        Err(KaiTorchError::UnknownActivation { .. })
    ));
    assert!(matches!(
        Dense::new(1).with_initializer_name("zeros", &initializers),
        Err(KaiTorchError::UnknownInitializer { .. })
    ));
    Ok(())
}

#[test]
fn test_dense_errors() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(0);

    let unbuilt = Dense::new(2);
    assert_eq!(
        unbuilt.forward(&mut graph, &[], false, &mut rng),
        Err(KaiTorchError::ModelNotBuilt)
    );

    let mut empty = Dense::new(2);
    assert!(matches!(
        empty.build(0, &mut graph, &mut rng),
        Err(KaiTorchError::InvalidArgument(_))
    ));

    let layer = built(Dense::new(1), 2, &mut graph)?;
    let x = [graph.leaf(1.0)];
    assert_eq!(
        layer.forward(&mut graph, &x, false, &mut rng),
        Err(KaiTorchError::ShapeMismatch {
            expected: 2,
            actual: 1,
            operation: "Dense::forward".to_string()
        })
    );
    Ok(())
}
