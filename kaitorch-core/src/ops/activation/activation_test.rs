use super::*;
use crate::autograd::grad_check::check_grad;
use approx::assert_relative_eq;

#[test]
fn test_sigmoid_end_to_end() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let a = graph.leaf(2.0);
    let b = graph.leaf(-3.0);
    let c = graph.leaf(10.0);
    let e = graph.mul(a, b)?;
    let d = graph.add(e, c)?;
    let loss = graph.activation(d, "sigmoid")?;
    graph.backward(loss)?;

    assert_relative_eq!(graph.grad(d)?, 0.017663, epsilon = 1e-4);
    assert_relative_eq!(graph.grad(c)?, 0.017663, epsilon = 1e-4);
    assert_relative_eq!(graph.grad(b)?, 0.035326, epsilon = 1e-4);
    assert_relative_eq!(graph.grad(a)?, -0.052988, epsilon = 1e-4);
    Ok(())
}

#[test]
fn test_activation_by_name_and_by_value_agree() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let x = graph.leaf(-0.7);
    let by_name = graph.activation(x, "LeakyReLU")?;
    let by_value = graph.activation(x, Activation::LeakyRelu { alpha: 0.01 })?;

    assert_eq!(graph.value(by_name)?, graph.value(by_value)?);
    assert_eq!(graph.op(by_name)?, graph.op(by_value)?);
    assert_eq!(graph.op(by_name)?.tag(), "LeakyReLU");
    Ok(())
}

#[test]
fn test_unknown_activation_leaves_graph_untouched() {
    let mut graph = Graph::new();
    let x = graph.leaf(1.0);
    let len_before = graph.len();

    let result = graph.activation(x, "softsign");
    assert!(matches!(
        result,
        Err(KaiTorchError::UnknownActivation { ref name, .. }) if name == "softsign"
    ));
    assert_eq!(graph.len(), len_before);
}

#[test]
fn test_custom_registry_on_graph() -> Result<(), KaiTorchError> {
    let mut registry = Registry::with_defaults();
    registry.register("hard_leaky", || Activation::LeakyRelu { alpha: 0.5 });
    let mut graph = Graph::with_activations(registry);

    let y = graph.activation(-2.0, "hard_leaky")?;
    assert_relative_eq!(graph.value(y)?, -1.0);
    Ok(())
}

#[test]
fn test_activation_gradients_numerically() {
    let activations = [
        Activation::Sigmoid,
        Activation::Tanh,
        Activation::Relu,
        Activation::LeakyRelu { alpha: 0.2 },
        Activation::Elu { alpha: 0.7 },
        Activation::Swish { beta: 1.3 },
    ];
    for activation in activations {
        for x in [-1.3, 0.6] {
            let result = check_grad(
                |graph, inputs| {
                    let scaled = graph.mul(inputs[0], 1.5)?;
                    activation_op(graph, scaled, activation)
                },
                &[x],
                1e-5,
                1e-4,
            );
            assert!(result.is_ok(), "{} at {}: {:?}", activation, x, result);
        }
    }
}

#[test]
fn test_relu_gradient_is_zero_at_zero() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let x = graph.leaf(0.0);
    let y = graph.relu(x)?;
    graph.backward(y)?;
    assert_eq!(graph.grad(x)?, 0.0);
    Ok(())
}

#[test]
fn test_display_includes_hyperparameters() {
    assert_eq!(Activation::Sigmoid.to_string(), "sigmoid");
    assert_eq!(Activation::LeakyRelu { alpha: 0.01 }.to_string(), "LeakyReLU(α=0.01)");
    assert_eq!(Activation::Swish { beta: 1.0 }.to_string(), "swish(β=1)");
}

#[test]
fn test_softmax_values_and_gradients() -> Result<(), KaiTorchError> {
    let mut graph = Graph::new();
    let xs: Vec<NodeId> = [1.0, 2.0, 3.0].iter().map(|&v| graph.leaf(v)).collect();
    let probs = graph.softmax(&xs)?;

    let total: f64 = [1.0_f64, 2.0, 3.0].iter().map(|v| v.exp()).sum();
    let mut sum = 0.0;
    for (i, &p) in probs.iter().enumerate() {
        let expected = ((i + 1) as f64).exp() / total;
        assert_relative_eq!(graph.value(p)?, expected, epsilon = 1e-6);
        sum += graph.value(p)?;
    }
    assert_relative_eq!(sum, 1.0, epsilon = 1e-6);

    // d p0 / d x_j = p0 (δ0j − p_j)
    let p: Vec<f64> = probs.iter().map(|&id| graph.value(id)).collect::<Result<_, _>>()?;
    graph.backward(probs[0])?;
    assert_relative_eq!(graph.grad(xs[0])?, p[0] * (1.0 - p[0]), epsilon = 1e-6);
    assert_relative_eq!(graph.grad(xs[1])?, -p[0] * p[1], epsilon = 1e-6);
    assert_relative_eq!(graph.grad(xs[2])?, -p[0] * p[2], epsilon = 1e-6);
    Ok(())
}

#[test]
fn test_softmax_rejects_empty_input() {
    let mut graph = Graph::new();
    assert_eq!(
        graph.softmax(&[]),
        Err(KaiTorchError::EmptyInput("softmax".to_string()))
    );
}
