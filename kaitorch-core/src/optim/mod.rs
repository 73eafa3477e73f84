// kaitorch-core/src/optim/mod.rs

//! Optimizers for training models built on a [`Graph`](crate::graph::Graph).
//!
//! Every optimizer implements [`Optimizer`] and keeps its per-parameter
//! moments in an [`OptimizerState`] it owns. Optimizers can be constructed
//! directly from their config structs or by name through a
//! `Registry<Box<dyn Optimizer>>`, which builds them with default
//! hyperparameters.

pub mod adagrad;
pub mod adam;
pub mod optimizer_state;
pub mod optimizer_trait;
pub mod rmsprop;
pub mod sgd;

pub use adagrad::{Adagrad, AdagradConfig};
pub use adam::{Adam, AdamConfig};
pub use optimizer_state::{OptimizerState, ParamState};
pub use optimizer_trait::Optimizer;
pub use rmsprop::{RmsProp, RmsPropConfig};
pub use sgd::{Momentum, MomentumConfig, Nesterov, Sgd, SgdConfig};

use crate::error::KaiTorchError;
use crate::registry::Registered;

impl Registered for Box<dyn Optimizer> {
    fn defaults() -> Vec<(&'static str, fn() -> Self)> {
        vec![
            ("SGD", || -> Box<dyn Optimizer> { Box::new(Sgd::default()) }),
            ("Momentum", || -> Box<dyn Optimizer> { Box::new(Momentum::default()) }),
            ("Nesterov", || -> Box<dyn Optimizer> { Box::new(Nesterov::default()) }),
            ("Adagrad", || -> Box<dyn Optimizer> { Box::new(Adagrad::default()) }),
            ("RMSprop", || -> Box<dyn Optimizer> { Box::new(RmsProp::default()) }),
            ("Adam", || -> Box<dyn Optimizer> { Box::new(Adam::default()) }),
        ]
    }

    fn unknown(name: &str, available: Vec<String>) -> KaiTorchError {
        KaiTorchError::UnknownOptimizer {
            name: name.to_string(),
            available,
        }
    }
}
