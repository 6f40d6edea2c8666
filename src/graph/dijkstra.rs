//! Weight-only shortest paths.
//!
//! # Algorithm
//!
//! Dijkstra's label-setting search with a binary heap and lazy deletion:
//! stale heap entries (whose cost exceeds the best known label) are skipped
//! on pop. Correct for non-negative weights, which [`RoadGraph::build`]
//! enforces.
//!
//! # Complexity
//!
//! O((V + E) log V).
//!
//! # Reference
//!
//! Dijkstra, E.W. (1959). "A note on two problems in connexion with graphs",
//! *Numerische Mathematik* 1, 269-271.

use std::collections::BinaryHeap;

use crate::error::NoPathFound;

use super::search::{reconstruct, OpenEntry};
use super::{RoadGraph, ShortestPath};

/// Finds a minimum-weight path from `source` to `target`.
///
/// # Errors
///
/// [`NoPathFound`] if either endpoint is not a graph node or `target` is
/// unreachable.
///
/// # Examples
///
/// ```
/// use courier_routing::graph::{shortest_path, RoadGraph};
///
/// let graph = RoadGraph::build([("D", "A", 1.0), ("D", "B", 5.0), ("A", "B", 1.0)]).unwrap();
/// let path = shortest_path(&graph, "D", "B").unwrap();
/// assert_eq!(path.nodes, vec!["D", "A", "B"]);
/// assert_eq!(path.cost, 2.0);
/// ```
pub fn shortest_path(
    graph: &RoadGraph,
    source: &str,
    target: &str,
) -> Result<ShortestPath, NoPathFound> {
    let (Some(s), Some(t)) = (graph.node_index(source), graph.node_index(target)) else {
        return Err(NoPathFound::new(source, target));
    };

    let n = graph.num_nodes();
    let mut dist = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<(usize, f64)>> = vec![None; n];
    let mut heap = BinaryHeap::new();
    let mut sequence = 0u64;

    dist[s] = 0.0;
    heap.push(OpenEntry {
        priority: 0.0,
        cost: 0.0,
        sequence,
        node: s,
    });

    while let Some(OpenEntry { cost, node, .. }) = heap.pop() {
        if cost > dist[node] {
            continue;
        }
        if node == t {
            return Ok(reconstruct(graph, &parent, s, t));
        }
        for &(next, weight) in graph.adjacent(node) {
            let candidate = cost + weight;
            if candidate < dist[next] {
                dist[next] = candidate;
                parent[next] = Some((node, weight));
                sequence += 1;
                heap.push(OpenEntry {
                    priority: candidate,
                    cost: candidate,
                    sequence,
                    node: next,
                });
            }
        }
    }

    Err(NoPathFound::new(source, target))
}

/// Shortest-path cost from node index `source` to every node.
///
/// Unreachable nodes get `f64::INFINITY`.
pub(crate) fn single_source_costs(graph: &RoadGraph, source: usize) -> Vec<f64> {
    let n = graph.num_nodes();
    let mut dist = vec![f64::INFINITY; n];
    let mut heap = BinaryHeap::new();
    let mut sequence = 0u64;

    dist[source] = 0.0;
    heap.push(OpenEntry {
        priority: 0.0,
        cost: 0.0,
        sequence,
        node: source,
    });

    while let Some(OpenEntry { cost, node, .. }) = heap.pop() {
        if cost > dist[node] {
            continue;
        }
        for &(next, weight) in graph.adjacent(node) {
            let candidate = cost + weight;
            if candidate < dist[next] {
                dist[next] = candidate;
                sequence += 1;
                heap.push(OpenEntry {
                    priority: candidate,
                    cost: candidate,
                    sequence,
                    node: next,
                });
            }
        }
    }

    dist
}
