//! Heuristic-guided shortest paths.
//!
//! # Algorithm
//!
//! A* search. The open set is a binary heap ordered by f = g + h, where g is
//! the best known cost from the source and h the straight-line distance to the
//! target. Ties on f pop in discovery order. A cheaper g for a node pushes a
//! fresh entry and the stale one is skipped on pop, so nodes may be expanded
//! again if the heuristic is admissible but not consistent. The search stops
//! when the target is popped.
//!
//! With weights at least as long as the straight line between their
//! endpoints, h never overestimates and the first completion is optimal.
//! Nodes without coordinates contribute h = 0, which keeps that guarantee.
//!
//! # Complexity
//!
//! O((V + E) log V) worst case, usually far fewer expansions than Dijkstra.
//!
//! # Reference
//!
//! Hart, P.E., Nilsson, N.J. & Raphael, B. (1968). "A Formal Basis for the
//! Heuristic Determination of Minimum Cost Paths", *IEEE Transactions on
//! Systems Science and Cybernetics* 4(2), 100-107.

use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::NoPathFound;
use crate::graph::search::{reconstruct, OpenEntry};
use crate::graph::{RoadGraph, ShortestPath};
use crate::models::{CoordinateTable, PathSegment};

use super::EuclideanHeuristic;

/// Result of an A* query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AStarPath {
    /// The path found and its exact cost.
    pub path: ShortestPath,
    /// Nodes whose coordinates were missing; non-empty means degraded.
    pub missing_coordinates: Vec<String>,
    /// Number of node expansions performed.
    pub expanded: usize,
}

impl AStarPath {
    /// Returns `true` if the heuristic fell back to zero for some node.
    pub fn is_degraded(&self) -> bool {
        !self.missing_coordinates.is_empty()
    }

    /// Converts into a route segment record.
    pub fn into_segment(self) -> PathSegment {
        let origin = self.path.nodes.first().cloned().unwrap_or_default();
        let destination = self.path.nodes.last().cloned().unwrap_or_default();
        PathSegment {
            origin,
            destination,
            nodes: self.path.nodes,
            cost: self.path.cost,
            missing_coordinates: self.missing_coordinates,
        }
    }
}

/// Finds a minimum-cost path from `source` to `target` using A*.
///
/// # Errors
///
/// [`NoPathFound`] if either endpoint is not a graph node or the open set
/// empties before the target is reached.
///
/// # Examples
///
/// ```
/// use courier_routing::graph::RoadGraph;
/// use courier_routing::models::{CoordinateTable, Location};
/// use courier_routing::pathfinding::shortest_path_astar;
///
/// let graph = RoadGraph::build([("A", "B", 1.0), ("B", "C", 1.0), ("A", "C", 5.0)]).unwrap();
/// let coords = CoordinateTable::from_locations(&[
///     Location::new("A", 0.0, 0.0),
///     Location::new("B", 1.0, 0.0),
///     Location::new("C", 2.0, 0.0),
/// ]);
///
/// let found = shortest_path_astar(&graph, "A", "C", &coords).unwrap();
/// assert_eq!(found.path.nodes, vec!["A", "B", "C"]);
/// assert_eq!(found.path.cost, 2.0);
/// assert!(!found.is_degraded());
/// ```
pub fn shortest_path_astar(
    graph: &RoadGraph,
    source: &str,
    target: &str,
    coordinates: &CoordinateTable,
) -> Result<AStarPath, NoPathFound> {
    let (Some(s), Some(t)) = (graph.node_index(source), graph.node_index(target)) else {
        return Err(NoPathFound::new(source, target));
    };

    let mut heuristic = EuclideanHeuristic::new(coordinates, target);
    let n = graph.num_nodes();
    let mut estimates: Vec<Option<f64>> = vec![None; n];
    let mut g_score = vec![f64::INFINITY; n];
    let mut parent: Vec<Option<(usize, f64)>> = vec![None; n];
    let mut heap = BinaryHeap::new();
    let mut sequence = 0u64;
    let mut expanded = 0usize;

    let mut estimate = |node: usize, heuristic: &mut EuclideanHeuristic<'_>| -> f64 {
        *estimates[node].get_or_insert_with(|| heuristic.estimate(graph.node_id(node)))
    };

    g_score[s] = 0.0;
    heap.push(OpenEntry {
        priority: estimate(s, &mut heuristic),
        cost: 0.0,
        sequence,
        node: s,
    });

    while let Some(OpenEntry { cost, node, .. }) = heap.pop() {
        if cost > g_score[node] {
            continue;
        }
        if node == t {
            let path = reconstruct(graph, &parent, s, t);
            debug!(source, target, cost = path.cost, expanded, "a* path found");
            return Ok(AStarPath {
                path,
                missing_coordinates: heuristic.into_missing(),
                expanded,
            });
        }

        expanded += 1;
        for &(next, weight) in graph.adjacent(node) {
            let candidate = cost + weight;
            if candidate < g_score[next] {
                g_score[next] = candidate;
                parent[next] = Some((node, weight));
                sequence += 1;
                heap.push(OpenEntry {
                    priority: candidate + estimate(next, &mut heuristic),
                    cost: candidate,
                    sequence,
                    node: next,
                });
            }
        }
    }

    debug!(source, target, expanded, "a* open set exhausted");
    Err(NoPathFound::new(source, target))
}
