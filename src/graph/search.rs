//! Open-set bookkeeping shared by Dijkstra and A*.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::RoadGraph;

/// A path through the road graph with its total weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortestPath {
    /// Node ids from source to target, both included.
    pub nodes: Vec<String>,
    /// Forward sum of the traversed edge weights.
    pub cost: f64,
}

/// Open-set entry ordered for a min-heap on `priority`.
///
/// `cost` is the path cost to `node` when the entry was pushed; entries whose
/// cost exceeds the node's current label are stale. Equal priorities pop in
/// discovery order (lower `sequence` first).
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpenEntry {
    pub priority: f64,
    pub cost: f64,
    pub sequence: u64,
    pub node: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Walks `parent` links back from `target` and rebuilds the path.
///
/// The cost is re-summed source-to-target over the recorded edge weights, so
/// it matches summing the returned path's edges in order.
pub(crate) fn reconstruct(
    graph: &RoadGraph,
    parent: &[Option<(usize, f64)>],
    source: usize,
    target: usize,
) -> ShortestPath {
    let mut hops = Vec::new();
    let mut current = target;
    while current != source {
        match parent[current] {
            Some((prev, weight)) => {
                hops.push((current, weight));
                current = prev;
            }
            None => break,
        }
    }
    hops.reverse();

    let mut nodes = Vec::with_capacity(hops.len() + 1);
    nodes.push(graph.node_id(source).to_string());
    let mut cost = 0.0;
    for (node, weight) in hops {
        nodes.push(graph.node_id(node).to_string());
        cost += weight;
    }
    ShortestPath { nodes, cost }
}
