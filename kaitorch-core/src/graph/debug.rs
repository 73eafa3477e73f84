// src/graph/debug.rs

use crate::error::KaiTorchError;
use crate::graph::{Graph, NodeId};
use std::collections::BTreeSet;
use std::fmt::Write;

/// Collects every node reachable from `roots` and every parent -> child edge.
///
/// Both collections are sorted by node index.
pub fn trace(
    graph: &Graph,
    roots: &[NodeId],
) -> Result<(Vec<NodeId>, Vec<(NodeId, NodeId)>), KaiTorchError> {
    let mut nodes = BTreeSet::new();
    let mut edges = BTreeSet::new();
    let mut stack: Vec<NodeId> = roots.to_vec();

    while let Some(id) = stack.pop() {
        if !nodes.insert(id) {
            continue;
        }
        for parent in graph.parents(id)? {
            edges.insert((parent, id));
            stack.push(parent);
        }
    }
    Ok((nodes.into_iter().collect(), edges.into_iter().collect()))
}

/// Renders the graph reachable from `roots` as Graphviz DOT text.
///
/// Each node becomes a record `{data | grad}`; every non-leaf also gets an
/// operation node feeding it, and parents point at that operation node.
pub fn to_dot(graph: &Graph, roots: &[NodeId]) -> Result<String, KaiTorchError> {
    let (nodes, edges) = trace(graph, roots)?;
    let mut dot = String::from("digraph {\n    rankdir=TB;\n");

    for &id in &nodes {
        let node = graph.node(id)?;
        let uid = id.index();
        // Writing into a String cannot fail.
        let _ = writeln!(
            dot,
            "    n{uid} [label=\"{{data {:.4} | grad {:.4}}}\", shape=record];",
            node.value, node.grad
        );
        let tag = node.op.tag();
        if !tag.is_empty() {
            let _ = writeln!(dot, "    n{uid}_op [label=\"{tag}\"];");
            let _ = writeln!(dot, "    n{uid}_op -> n{uid};");
        }
    }
    for (parent, child) in edges {
        let _ = writeln!(dot, "    n{} -> n{}_op;", parent.index(), child.index());
    }
    dot.push_str("}\n");
    Ok(dot)
}
