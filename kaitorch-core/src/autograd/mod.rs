//! # Automatic Differentiation (`autograd`)
//!
//! - [`backward_op`]: the [`OpKind`] tag stored on every node and the dispatch
//!   table that turns it into local partial derivatives.
//! - [`graph`]: the topological scheduler used by `Graph::backward`.
//! - [`grad_check`]: central-difference verification of analytic gradients.

pub mod backward_op;
pub mod grad_check;
pub mod graph;

pub use backward_op::OpKind;
pub use graph::topological_sort;
