//! # kaitorch-core
//!
//! A scalar reverse-mode automatic differentiation engine, plus a small
//! Keras-style toolkit (dense layers, losses, optimizers, a `Sequential`
//! model) built on top of it.
//!
//! Every value lives as a node in a [`Graph`] arena and is referred to by its
//! [`NodeId`]. Operations append nodes, and [`Graph::backward`] fills in the
//! gradient of every node reachable from a target.
//!
//! ```
//! use kaitorch_core::{Graph, KaiTorchError};
//!
//! # fn main() -> Result<(), KaiTorchError> {
//! let mut graph = Graph::new();
//! let a = graph.leaf(2.0);
//! let b = graph.leaf(-3.0);
//! let e = graph.mul(a, b)?;
//! let d = graph.add(e, 10.0)?;
//! let out = graph.activation(d, "sigmoid")?;
//! graph.backward(out)?;
//! assert!((graph.grad(a)? + 0.052988).abs() < 1e-4);
//! # Ok(())
//! # }
//! ```

pub mod autograd;
pub mod error;
pub mod graph;
pub mod model;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod registry;
pub mod utils;

pub use error::KaiTorchError;
pub use graph::{Graph, NodeId};
pub use model::{FitConfig, History, Sequential};
pub use nn::{Dense, Dropout, Initializer, LayerActivation, Loss, Module};
pub use ops::activation::{Activation, ActivationRef};
pub use ops::{Operand, EPSILON};
pub use optim::Optimizer;
pub use registry::{Registered, Registry};
