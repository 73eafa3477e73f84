//! # Activation Functions
//!
//! Per-node activations are single graph nodes tagged
//! `OpKind::Activation(..)`; their forward value and derivative come from the
//! closed forms in [`functional`]. [`softmax`] is different: it works on a
//! whole list of nodes and is composed from `exp`, `add` and `div`.
//!
//! Activations can be requested by value or by name. Names go through the
//! graph's activation [`Registry`]:
//!
//! | name        | activation                 |
//! |-------------|----------------------------|
//! | `sigmoid`   | `Sigmoid`                  |
//! | `tanh`      | `Tanh`                     |
//! | `ReLU`      | `Relu`                     |
//! | `LeakyReLU` | `LeakyRelu { alpha: 0.01 }`|
//! | `ELU`       | `Elu { alpha: 0.01 }`      |
//! | `swish`     | `Swish { beta: 1.0 }`      |

use crate::autograd::OpKind;
use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use crate::ops::{apply_unary_op, Operand};
use crate::registry::{Registered, Registry};
use log::warn;
use std::fmt;

pub mod functional;
pub mod softmax;

pub use softmax::softmax;

/// A scalar activation and its hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    Sigmoid,
    Tanh,
    Relu,
    LeakyRelu { alpha: f64 },
    Elu { alpha: f64 },
    Swish { beta: f64 },
}

impl Activation {
    /// Registry name, also used as the node's op tag.
    pub fn name(&self) -> &'static str {
        match self {
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::Relu => "ReLU",
            Activation::LeakyRelu { .. } => "LeakyReLU",
            Activation::Elu { .. } => "ELU",
            Activation::Swish { .. } => "swish",
        }
    }

    pub fn forward(&self, x: f64) -> f64 {
        match *self {
            Activation::Sigmoid => functional::sigmoid(x),
            Activation::Tanh => functional::tanh(x),
            Activation::Relu => functional::relu(x),
            Activation::LeakyRelu { alpha } => functional::leaky_relu(x, alpha),
            Activation::Elu { alpha } => functional::elu(x, alpha),
            Activation::Swish { beta } => functional::swish(x, beta),
        }
    }

    /// d(out)/dx, given the input `x` and the already computed `out`.
    pub fn derivative(&self, x: f64, out: f64) -> f64 {
        match *self {
            Activation::Sigmoid => functional::sigmoid_derivative(out),
            Activation::Tanh => functional::tanh_derivative(out),
            Activation::Relu => functional::relu_derivative(x),
            Activation::LeakyRelu { alpha } => functional::leaky_relu_derivative(x, alpha),
            Activation::Elu { alpha } => functional::elu_derivative(x, alpha),
            Activation::Swish { beta } => functional::swish_derivative(x, beta),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activation::LeakyRelu { alpha } | Activation::Elu { alpha } => {
                write!(f, "{}(α={})", self.name(), alpha)
            }
            Activation::Swish { beta } => write!(f, "{}(β={})", self.name(), beta),
            _ => f.write_str(self.name()),
        }
    }
}

fn leaky_relu_default() -> Activation {
    warn!("LeakyReLU built by name, using default alpha=0.01");
    Activation::LeakyRelu { alpha: 0.01 }
}

fn elu_default() -> Activation {
    warn!("ELU built by name, using default alpha=0.01");
    Activation::Elu { alpha: 0.01 }
}

fn swish_default() -> Activation {
    warn!("swish built by name, using default beta=1");
    Activation::Swish { beta: 1.0 }
}

impl Registered for Activation {
    fn defaults() -> Vec<(&'static str, fn() -> Self)> {
        vec![
            ("sigmoid", || Activation::Sigmoid),
            ("tanh", || Activation::Tanh),
            ("ReLU", || Activation::Relu),
            ("LeakyReLU", leaky_relu_default),
            ("ELU", elu_default),
            ("swish", swish_default),
        ]
    }

    fn unknown(name: &str, available: Vec<String>) -> KaiTorchError {
        KaiTorchError::UnknownActivation {
            name: name.to_string(),
            available,
        }
    }
}

/// An activation given either by registry name or as a ready value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivationRef<'a> {
    Name(&'a str),
    Object(Activation),
}

impl<'a> From<&'a str> for ActivationRef<'a> {
    fn from(name: &'a str) -> Self {
        ActivationRef::Name(name)
    }
}

impl From<Activation> for ActivationRef<'_> {
    fn from(activation: Activation) -> Self {
        ActivationRef::Object(activation)
    }
}

impl<'a> ActivationRef<'a> {
    /// Turns a name into an [`Activation`] using `registry`.
    pub fn resolve(self, registry: &Registry<Activation>) -> Result<Activation, KaiTorchError> {
        match self {
            ActivationRef::Name(name) => registry.resolve(name),
            ActivationRef::Object(activation) => Ok(activation),
        }
    }
}

/// Applies `activation` to `a`, creating one `OpKind::Activation` node.
pub fn activation_op(
    graph: &mut Graph,
    a: impl Into<Operand>,
    activation: Activation,
) -> Result<NodeId, KaiTorchError> {
    apply_unary_op(
        graph,
        a.into(),
        |x| activation.forward(x),
        OpKind::Activation(activation),
    )
}

impl Graph {
    /// Applies an activation given by value or by registered name.
    ///
    /// Unknown names fail with [`KaiTorchError::UnknownActivation`] and leave
    /// the graph unchanged.
    pub fn activation<'a>(
        &mut self,
        a: impl Into<Operand>,
        activation: impl Into<ActivationRef<'a>>,
    ) -> Result<NodeId, KaiTorchError> {
        let activation = activation.into().resolve(&self.activations)?;
        activation_op(self, a, activation)
    }

    pub fn sigmoid(&mut self, a: impl Into<Operand>) -> Result<NodeId, KaiTorchError> {
        activation_op(self, a, Activation::Sigmoid)
    }

    pub fn tanh(&mut self, a: impl Into<Operand>) -> Result<NodeId, KaiTorchError> {
        activation_op(self, a, Activation::Tanh)
    }

    pub fn relu(&mut self, a: impl Into<Operand>) -> Result<NodeId, KaiTorchError> {
        activation_op(self, a, Activation::Relu)
    }
}

#[cfg(test)]
#[path = "activation_test.rs"]
mod tests;
