use crate::graph::{Graph, NodeId};

/// Creates one leaf per value.
pub fn leaves(graph: &mut Graph, values: &[f64]) -> Vec<NodeId> {
    values.iter().map(|&v| graph.leaf(v)).collect()
}

/// Asserts that the values of `ids` match `expected` within `tolerance`.
///
/// Panics with the offending index on the first mismatch.
pub fn check_values_near(graph: &Graph, ids: &[NodeId], expected: &[f64], tolerance: f64) {
    assert_eq!(ids.len(), expected.len(), "Length mismatch");
    for (i, (&id, &e)) in ids.iter().zip(expected).enumerate() {
        let actual = graph
            .value(id)
            .unwrap_or_else(|err| panic!("Failed to read node {:?}: {}", id, err));
        let diff = (actual - e).abs();
        if diff > tolerance {
            panic!(
                "Value mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, actual, e, diff, tolerance
            );
        }
    }
}

/// Same as [`check_values_near`] for accumulated gradients.
pub fn check_grads_near(graph: &Graph, ids: &[NodeId], expected: &[f64], tolerance: f64) {
    assert_eq!(ids.len(), expected.len(), "Length mismatch");
    for (i, (&id, &e)) in ids.iter().zip(expected).enumerate() {
        let actual = graph
            .grad(id)
            .unwrap_or_else(|err| panic!("Failed to read node {:?}: {}", id, err));
        let diff = (actual - e).abs();
        if diff > tolerance {
            panic!(
                "Gradient mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, actual, e, diff, tolerance
            );
        }
    }
}
