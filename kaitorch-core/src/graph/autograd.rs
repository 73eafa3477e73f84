// src/graph/autograd.rs

use crate::autograd::{backward_op::propagate, graph::topological_sort};
use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use log::{debug, trace};

impl Graph {
    /// Computes d(`target`)/d(x) for every node x reachable from `target`.
    ///
    /// This pass's adjoints are collected in a scratch buffer seeded with 1.0
    /// at the target; each node's backward rule runs exactly once in reverse
    /// topological order. The buffer is then added into every reachable
    /// node's `grad` with `+=`, except the target, whose `grad` is set to 1.0.
    ///
    /// Gradients are never reset here. Calling `backward` twice on the same
    /// graph without zeroing doubles every ancestor's gradient. Zeroing is the
    /// caller's job, see [`Graph::zero_grad`].
    pub fn backward(&mut self, target: NodeId) -> Result<(), KaiTorchError> {
        let order = topological_sort(self, target)?;
        debug!(
            "backward() from node {} over {} reachable nodes",
            target.index(),
            order.len()
        );

        let mut adjoints = vec![0.0; self.nodes.len()];
        adjoints[target.index()] = 1.0;
        for &id in order.iter().rev() {
            trace!(
                "[backward] node {} ({}) adjoint={}",
                id.index(),
                self.nodes[id.index()].op.tag(),
                adjoints[id.index()]
            );
            propagate(self, id, &mut adjoints);
        }

        for &id in &order {
            if id != target {
                self.nodes[id.index()].grad += adjoints[id.index()];
            }
        }
        self.nodes[target.index()].grad = 1.0;
        Ok(())
    }
}
