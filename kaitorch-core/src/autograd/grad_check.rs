use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use approx::relative_eq;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical_grad:?} != numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },

    #[error("Numerical gradient is NaN or infinite for input {input_index}. Loss+: {loss_plus:?}, Loss-: {loss_minus:?}")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Analytical gradient is NaN or infinite for input {input_index}. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },

    #[error("Graph error during gradient check: {0}")]
    GraphError(KaiTorchError),
}

// Map KaiTorchError to GradCheckError::GraphError
impl From<KaiTorchError> for GradCheckError {
    fn from(err: KaiTorchError) -> Self {
        GradCheckError::GraphError(err)
    }
}

/// Checks analytical gradients against central finite differences.
///
/// `func` receives a fresh graph and one leaf per entry of `inputs`, and must
/// return the scalar output node. The analytical gradient of each input is
/// compared with `(f(x + step) - f(x - step)) / (2 * step)`; a pair passes when
/// `|analytical - numerical| <= tolerance * max(|analytical|, |numerical|, 1)`,
/// i.e. within `tolerance` in absolute or relative terms.
///
/// Returns the analytical gradients on success.
pub fn check_grad<F>(
    func: F,
    inputs: &[f64],
    step: f64,
    tolerance: f64,
) -> Result<Vec<f64>, GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, KaiTorchError>,
{
    let analytical = analytical_grads(&func, inputs)?;

    let mut perturbed = inputs.to_vec();
    for (i, &analytical_grad) in analytical.iter().enumerate() {
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index: i,
                value: analytical_grad,
            });
        }

        perturbed[i] = inputs[i] + step;
        let loss_plus = evaluate(&func, &perturbed)?;
        perturbed[i] = inputs[i] - step;
        let loss_minus = evaluate(&func, &perturbed)?;
        perturbed[i] = inputs[i];

        let numerical_grad = (loss_plus - loss_minus) / (2.0 * step);
        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index: i,
                loss_plus,
                loss_minus,
            });
        }

        if !relative_eq!(
            analytical_grad,
            numerical_grad,
            epsilon = tolerance,
            max_relative = tolerance
        ) {
            return Err(GradCheckError::GradientMismatch {
                input_index: i,
                analytical_grad,
                numerical_grad,
                difference: (analytical_grad - numerical_grad).abs(),
            });
        }
    }
    Ok(analytical)
}

fn analytical_grads<F>(func: &F, inputs: &[f64]) -> Result<Vec<f64>, KaiTorchError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, KaiTorchError>,
{
    let mut graph = Graph::new();
    let leaves: Vec<NodeId> = inputs.iter().map(|&v| graph.leaf(v)).collect();
    let output = func(&mut graph, &leaves)?;
    graph.backward(output)?;
    leaves.iter().map(|&leaf| graph.grad(leaf)).collect()
}

fn evaluate<F>(func: &F, inputs: &[f64]) -> Result<f64, KaiTorchError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, KaiTorchError>,
{
    let mut graph = Graph::new();
    let leaves: Vec<NodeId> = inputs.iter().map(|&v| graph.leaf(v)).collect();
    let output = func(&mut graph, &leaves)?;
    graph.value(output)
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
