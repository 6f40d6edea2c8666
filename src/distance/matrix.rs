//! Dense shortest-path cost matrix.

use crate::graph::{single_source_costs, RoadGraph};

/// A dense n×n matrix of road costs stored in row-major order.
///
/// Built from a [`RoadGraph`] over a small set of points (a depot and its
/// stops): entry `(i, j)` is the plain shortest-path cost from point `i` to
/// point `j`, or `f64::INFINITY` when no path exists.
///
/// # Examples
///
/// ```
/// use courier_routing::distance::CostMatrix;
/// use courier_routing::graph::RoadGraph;
///
/// let graph = RoadGraph::build([("D", "A", 1.0), ("A", "B", 1.0), ("D", "B", 5.0)]).unwrap();
/// let cm = CostMatrix::from_graph(&graph, &["D", "B"]);
/// assert_eq!(cm.size(), 2);
/// assert_eq!(cm.get(0, 1), 2.0);
/// assert!(cm.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone)]
pub struct CostMatrix {
    data: Vec<f64>,
    size: usize,
}

impl CostMatrix {
    /// Creates a matrix of the given size with zero diagonal and every other
    /// entry unreachable.
    pub fn new(size: usize) -> Self {
        let mut data = vec![f64::INFINITY; size * size];
        for i in 0..size {
            data[i * size + i] = 0.0;
        }
        Self { data, size }
    }

    /// Computes pairwise shortest-path costs between `points`.
    ///
    /// Runs one single-source search per point that is a graph node, so
    /// repeated points are searched again. Points that are not graph nodes
    /// are unreachable from everything but themselves.
    pub fn from_graph<S: AsRef<str>>(graph: &RoadGraph, points: &[S]) -> Self {
        let n = points.len();
        let mut cm = Self::new(n);
        let indices: Vec<Option<usize>> = points
            .iter()
            .map(|p| graph.node_index(p.as_ref()))
            .collect();

        for (i, from) in indices.iter().enumerate() {
            let Some(from) = *from else {
                continue;
            };
            let costs = single_source_costs(graph, from);
            for (j, to) in indices.iter().enumerate() {
                if let Some(to) = *to {
                    cm.set(i, j, costs[to]);
                }
            }
        }
        cm
    }

    /// Creates a matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the cost from point `from` to point `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost from point `from` to point `to`.
    pub fn set(&mut self, from: usize, to: usize, cost: f64) {
        self.data[from * self.size + to] = cost;
    }

    /// Returns `true` if a path exists from `from` to `to`.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_finite()
    }

    /// Number of points in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    ///
    /// Unreachable pairs compare equal to each other.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if a.is_infinite() || b.is_infinite() {
                    if a != b {
                        return false;
                    }
                } else if (a - b).abs() > tol {
                    return false;
                }
            }
        }
        true
    }
}
