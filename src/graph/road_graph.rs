//! Undirected weighted road graph.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::RoutingError;

/// A street segment between two locations.
///
/// Direction is ignored: the segment can be traversed both ways at the same
/// cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// One endpoint.
    pub from: String,
    /// The other endpoint.
    pub to: String,
    /// Travel cost; must be finite and non-negative.
    pub weight: f64,
}

impl Edge {
    /// Creates an edge.
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weight,
        }
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B, f64)> for Edge {
    fn from((from, to, weight): (A, B, f64)) -> Self {
        Self::new(from, to, weight)
    }
}

/// Immutable undirected graph of the city's streets.
///
/// Nodes are location identifiers, interned to dense indices for the search
/// routines. Inserting the same unordered pair twice keeps the most recent
/// weight instead of creating a parallel edge.
///
/// # Examples
///
/// ```
/// use courier_routing::graph::RoadGraph;
///
/// let graph = RoadGraph::build([("D", "A", 1.0), ("A", "B", 2.0), ("B", "A", 0.5)]).unwrap();
/// assert_eq!(graph.num_nodes(), 3);
/// assert_eq!(graph.num_edges(), 2);
/// assert_eq!(graph.edge_weight("A", "B"), Some(0.5));
/// assert!(graph.has_node("D"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoadGraph {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<(usize, f64)>>,
    num_edges: usize,
}

impl RoadGraph {
    /// Builds a graph from edge triplets.
    ///
    /// # Errors
    ///
    /// [`RoutingError::InvalidEdgeWeight`] if any weight is negative or not
    /// finite. Nothing is built in that case.
    pub fn build<I>(edges: I) -> Result<Self, RoutingError>
    where
        I: IntoIterator,
        I::Item: Into<Edge>,
    {
        let mut graph = Self::default();
        for edge in edges {
            let edge: Edge = edge.into();
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(RoutingError::InvalidEdgeWeight {
                    from: edge.from,
                    to: edge.to,
                    weight: edge.weight,
                });
            }
            graph.insert_edge(edge);
        }

        info!(
            nodes = graph.num_nodes(),
            edges = graph.num_edges(),
            "road graph built"
        );
        Ok(graph)
    }

    fn insert_edge(&mut self, edge: Edge) {
        let a = self.intern(edge.from);
        let b = self.intern(edge.to);

        let existing = self.adjacency[a].iter_mut().find(|(n, _)| *n == b);
        if let Some(slot) = existing {
            slot.1 = edge.weight;
            if a != b {
                for slot in self.adjacency[b].iter_mut().filter(|(n, _)| *n == a) {
                    slot.1 = edge.weight;
                }
            }
            return;
        }

        self.adjacency[a].push((b, edge.weight));
        if a != b {
            self.adjacency[b].push((a, edge.weight));
        }
        self.num_edges += 1;
    }

    fn intern(&mut self, id: String) -> usize {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.ids.len();
        self.index.insert(id.clone(), idx);
        self.ids.push(id);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Returns `true` if `node` is an endpoint of some edge.
    pub fn has_node(&self, node: &str) -> bool {
        self.index.contains_key(node)
    }

    /// Neighbors of `node` with edge weights. Empty for unknown nodes.
    pub fn neighbors(&self, node: &str) -> Vec<(&str, f64)> {
        match self.node_index(node) {
            Some(idx) => self.adjacency[idx]
                .iter()
                .map(|&(n, w)| (self.ids[n].as_str(), w))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Weight of the edge between `a` and `b`, if they are adjacent.
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let a = self.node_index(a)?;
        let b = self.node_index(b)?;
        self.adjacency[a]
            .iter()
            .find(|(n, _)| *n == b)
            .map(|&(_, w)| w)
    }

    /// Sum of edge weights along a walk of node ids.
    ///
    /// Returns `None` if two consecutive nodes are not adjacent. A walk of
    /// zero or one node costs 0.
    pub fn path_cost<S: AsRef<str>>(&self, nodes: &[S]) -> Option<f64> {
        let mut cost = 0.0;
        for pair in nodes.windows(2) {
            cost += self.edge_weight(pair[0].as_ref(), pair[1].as_ref())?;
        }
        Some(cost)
    }

    /// Number of distinct nodes.
    pub fn num_nodes(&self) -> usize {
        self.ids.len()
    }

    /// Number of distinct undirected edges.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Node identifiers in first-insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.iter().map(String::as_str)
    }

    pub(crate) fn node_index(&self, node: &str) -> Option<usize> {
        self.index.get(node).copied()
    }

    pub(crate) fn node_id(&self, idx: usize) -> &str {
        &self.ids[idx]
    }

    pub(crate) fn adjacent(&self, idx: usize) -> &[(usize, f64)] {
        &self.adjacency[idx]
    }
}
