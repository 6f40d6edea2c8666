//! Straight-line distance heuristic with missing-coordinate tracking.

use tracing::warn;

use crate::models::{CoordinateTable, Coordinates};

/// Euclidean distance to a fixed goal, looked up by node id.
///
/// A node without coordinates (or a goal without coordinates) estimates 0,
/// which keeps the heuristic admissible. Each such node is logged once and
/// remembered so the caller can report the degradation.
///
/// # Examples
///
/// ```
/// use courier_routing::models::{CoordinateTable, Location};
/// use courier_routing::pathfinding::EuclideanHeuristic;
///
/// let table = CoordinateTable::from_locations(&[
///     Location::new("A", 0.0, 0.0),
///     Location::new("B", 3.0, 4.0),
/// ]);
/// let mut h = EuclideanHeuristic::new(&table, "B");
/// assert!((h.estimate("A") - 5.0).abs() < 1e-10);
/// assert_eq!(h.estimate("unknown"), 0.0);
/// assert_eq!(h.missing(), ["unknown"]);
/// ```
#[derive(Debug, Clone)]
pub struct EuclideanHeuristic<'a> {
    coordinates: &'a CoordinateTable,
    goal: &'a str,
    goal_position: Option<Coordinates>,
    missing: Vec<String>,
}

impl<'a> EuclideanHeuristic<'a> {
    /// Creates a heuristic toward `goal`.
    pub fn new(coordinates: &'a CoordinateTable, goal: &'a str) -> Self {
        let mut heuristic = Self {
            coordinates,
            goal,
            goal_position: coordinates.get(goal),
            missing: Vec::new(),
        };
        if heuristic.goal_position.is_none() {
            heuristic.record_missing(goal);
        }
        heuristic
    }

    /// Estimated remaining cost from `node` to the goal.
    pub fn estimate(&mut self, node: &str) -> f64 {
        let Some(goal) = self.goal_position else {
            return 0.0;
        };
        match self.coordinates.get(node) {
            Some(position) => position.distance_to(&goal),
            None => {
                self.record_missing(node);
                0.0
            }
        }
    }

    /// Nodes whose coordinates were missing, in discovery order.
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Returns `true` if any lookup fell back to zero.
    pub fn is_degraded(&self) -> bool {
        !self.missing.is_empty()
    }

    pub(crate) fn into_missing(self) -> Vec<String> {
        self.missing
    }

    fn record_missing(&mut self, node: &str) {
        if self.missing.iter().any(|m| m == node) {
            return;
        }
        warn!(
            node,
            goal = self.goal,
            "location not found in coordinate table; heuristic falls back to zero"
        );
        self.missing.push(node.to_string());
    }
}
