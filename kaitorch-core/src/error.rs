use crate::graph::NodeId;
use thiserror::Error;

/// Custom error type for the kaitorch toolkit.
///
/// Every variant is a usage error raised synchronously at the point of misuse
/// (construction time). None of them is ever produced mid-way through a
/// backward pass on a graph that was built successfully.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum KaiTorchError {
    #[error("Exponent of a power operation must be a plain number, got node {0:?}")]
    InvalidExponent(NodeId),

    #[error("Activation '{name}' is not registered (available: {available:?})")]
    UnknownActivation { name: String, available: Vec<String> },

    #[error("Initializer '{name}' is not registered (available: {available:?})")]
    UnknownInitializer { name: String, available: Vec<String> },

    #[error("Optimizer '{name}' is not registered (available: {available:?})")]
    UnknownOptimizer { name: String, available: Vec<String> },

    #[error("Loss '{name}' is not registered (available: {available:?})")]
    UnknownLoss { name: String, available: Vec<String> },

    #[error("Node {id:?} does not exist in a graph of {len} nodes")]
    NodeNotFound { id: NodeId, len: usize },

    #[error("Shape mismatch: expected {expected}, got {actual} during operation {operation}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        operation: String,
    },

    #[error("Dropout rate must be a probability in [0, 1], got {0}")]
    InvalidDropoutRate(f64),

    #[error("Model has not been built. Call build(input_width) first.")]
    ModelNotBuilt,

    #[error("Model has not been compiled. Call compile(optimizer, loss) first.")]
    ModelNotCompiled,

    #[error("Operation {0} received no input")]
    EmptyInput(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
