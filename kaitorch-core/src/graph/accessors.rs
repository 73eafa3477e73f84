// src/graph/accessors.rs

use crate::autograd::OpKind;
use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};

impl Graph {
    /// Current value of a node.
    pub fn value(&self, id: NodeId) -> Result<f64, KaiTorchError> {
        Ok(self.node(id)?.value)
    }

    /// Overwrites the value of a node.
    ///
    /// Meant for optimizers updating parameter leaves between passes. Nodes
    /// derived from `id` are not recomputed.
    pub fn set_value(&mut self, id: NodeId, value: f64) -> Result<(), KaiTorchError> {
        self.node_mut(id)?.value = value;
        Ok(())
    }

    /// Accumulated gradient of a node.
    pub fn grad(&self, id: NodeId) -> Result<f64, KaiTorchError> {
        Ok(self.node(id)?.grad)
    }

    /// Overwrites the gradient of a node (typically with 0.0).
    pub fn set_grad(&mut self, id: NodeId, grad: f64) -> Result<(), KaiTorchError> {
        self.node_mut(id)?.grad = grad;
        Ok(())
    }

    /// Operation that produced the node.
    pub fn op(&self, id: NodeId) -> Result<&OpKind, KaiTorchError> {
        Ok(&self.node(id)?.op)
    }

    /// Parents of a node, deduplicated by identity.
    pub fn parents(&self, id: NodeId) -> Result<Vec<NodeId>, KaiTorchError> {
        let mut parents: Vec<NodeId> = Vec::with_capacity(2);
        for input in self.node(id)?.inputs.iter() {
            if !parents.contains(&input) {
                parents.push(input);
            }
        }
        Ok(parents)
    }

    /// Resets the gradient of the given nodes to 0.0.
    pub fn zero_grad(&mut self, ids: &[NodeId]) -> Result<(), KaiTorchError> {
        for &id in ids {
            self.set_grad(id, 0.0)?;
        }
        Ok(())
    }

    /// Resets the gradient of every node in the graph to 0.0.
    pub fn zero_grad_all(&mut self) {
        for node in self.nodes.iter_mut() {
            node.grad = 0.0;
        }
    }
}
