//! # Computation Graph (`graph`)
//!
//! Every differentiable scalar lives in a single growable arena, [`Graph`].
//! Operations append a new [`Node`] and hand back a [`NodeId`], a stable index
//! into that arena. Inputs are referenced by index, so the graph never holds
//! reference-counted pointers and the parent relation is acyclic by
//! construction: a node can only point at indices smaller than its own.
//!
//! ## Structure:
//!
//! - `mod.rs`: the arena itself, node storage and leaf creation.
//! - `accessors.rs`: field access (`value`, `grad`, `parents`, `op`) and gradient zeroing.
//! - `autograd.rs`: the `backward()` entry point.
//! - `debug.rs`: graph tracing and Graphviz DOT export.

use crate::autograd::OpKind;
use crate::error::KaiTorchError;
use crate::ops::activation::Activation;
use crate::registry::Registry;
use log::debug;

pub mod accessors;
pub mod autograd;
pub mod debug;

/// Stable handle to a node stored in a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node inside its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Operands consumed by a node, in the order the operation received them.
///
/// Unlike the parent set, this keeps duplicates: `x * x` is `Binary(x, x)`, and
/// the backward rule pushes one contribution per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inputs {
    Nullary,
    Unary(NodeId),
    Binary(NodeId, NodeId),
}

impl Inputs {
    pub(crate) fn iter(self) -> impl DoubleEndedIterator<Item = NodeId> {
        let (first, second) = match self {
            Inputs::Nullary => (None, None),
            Inputs::Unary(a) => (Some(a), None),
            Inputs::Binary(a, b) => (Some(a), Some(b)),
        };
        first.into_iter().chain(second)
    }
}

/// A single differentiable scalar.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Node {
    pub(crate) value: f64,
    pub(crate) grad: f64,
    pub(crate) op: OpKind,
    pub(crate) inputs: Inputs,
}

/// Arena holding every node of a computation graph.
///
/// Besides the nodes, the graph owns the activation registry used to resolve
/// activations requested by name (see [`Graph::activation`]).
#[derive(Debug)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) activations: Registry<Activation>,
}

impl Default for Graph {
    fn default() -> Self {
        Graph::new()
    }
}

impl Graph {
    /// Creates an empty graph with the default activation registry.
    pub fn new() -> Self {
        Graph::with_activations(Registry::with_defaults())
    }

    /// Creates an empty graph resolving activation names through `activations`.
    pub fn with_activations(activations: Registry<Activation>) -> Self {
        Graph {
            nodes: Vec::new(),
            activations,
        }
    }

    /// Creates a leaf node: no parents, gradient 0.
    pub fn leaf(&mut self, value: f64) -> NodeId {
        self.push(value, OpKind::Leaf, Inputs::Nullary)
    }

    /// Number of nodes currently stored.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Discards every node at index `len` and above.
    ///
    /// Training loops create their parameters first, remember `graph.len()`,
    /// and truncate back to that mark after each forward/backward/step cycle.
    /// Ids of the removed nodes become invalid.
    pub fn truncate(&mut self, len: usize) {
        if len < self.nodes.len() {
            debug!("Truncating graph from {} to {} nodes", self.nodes.len(), len);
            self.nodes.truncate(len);
        }
    }

    /// The registry used to resolve activation names.
    pub fn activation_registry(&self) -> &Registry<Activation> {
        &self.activations
    }

    pub(crate) fn push(&mut self, value: f64, op: OpKind, inputs: Inputs) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            value,
            grad: 0.0,
            op,
            inputs,
        });
        id
    }

    /// Returns an error unless `id` refers to a node of this graph.
    pub(crate) fn check(&self, id: NodeId) -> Result<(), KaiTorchError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(KaiTorchError::NodeNotFound {
                id,
                len: self.nodes.len(),
            })
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&Node, KaiTorchError> {
        self.check(id)?;
        Ok(&self.nodes[id.0])
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, KaiTorchError> {
        self.check(id)?;
        Ok(&mut self.nodes[id.0])
    }
}
