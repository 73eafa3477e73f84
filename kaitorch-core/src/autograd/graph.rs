use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use log::trace;

/// Orders every node reachable from `target` so that each node appears after
/// all of its parents, each exactly once.
///
/// Depth-first postorder. A node is marked visited as soon as it is reached,
/// which keeps diamond-shaped sharing from appending it twice; it is appended
/// only after all of its parents have been. The traversal uses an explicit
/// stack so long chains cannot overflow the call stack.
///
/// Only the partial order (parents before children) is guaranteed. The
/// relative order of unrelated siblings is unspecified.
pub fn topological_sort(graph: &Graph, target: NodeId) -> Result<Vec<NodeId>, KaiTorchError> {
    graph.check(target)?;

    let mut visited = vec![false; graph.len()];
    let mut sorted = Vec::new();
    // (node, parents_done)
    let mut stack: Vec<(NodeId, bool)> = vec![(target, false)];

    while let Some((id, parents_done)) = stack.pop() {
        if parents_done {
            sorted.push(id);
            continue;
        }
        if visited[id.index()] {
            continue;
        }
        visited[id.index()] = true;
        trace!("[topological_sort] visiting node {}", id.index());

        stack.push((id, true));
        for parent in graph.nodes[id.index()].inputs.iter().rev() {
            if !visited[parent.index()] {
                stack.push((parent, false));
            }
        }
    }
    Ok(sorted)
}
