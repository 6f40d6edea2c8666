//! Route and path segment records.

use serde::{Deserialize, Serialize};

/// Whether a stop sequence came from a complete search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Completion {
    /// Every ordering was considered; the sequence is optimal.
    Exhaustive,
    /// The search budget ran out; the sequence is the best seen so far.
    BudgetExhausted {
        /// Orderings evaluated before stopping.
        evaluated: u64,
    },
}

impl Completion {
    /// Returns `true` if the result is proven optimal.
    pub fn is_exhaustive(&self) -> bool {
        matches!(self, Completion::Exhaustive)
    }
}

/// The visiting order chosen for one cluster.
///
/// Stops start with the depot and contain each cluster stop exactly once.
///
/// # Examples
///
/// ```
/// use courier_routing::models::{Completion, Route};
///
/// let route = Route::new(0, vec!["D".into(), "A".into()], 4.0, Completion::Exhaustive);
/// assert_eq!(route.depot(), Some("D"));
/// assert_eq!(route.legs().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    cluster_id: usize,
    stops: Vec<String>,
    cost: f64,
    completion: Completion,
}

impl Route {
    /// Creates a route. `stops[0]` is the depot.
    pub fn new(cluster_id: usize, stops: Vec<String>, cost: f64, completion: Completion) -> Self {
        Self {
            cluster_id,
            stops,
            cost,
            completion,
        }
    }

    /// Cluster served by this route.
    pub fn cluster_id(&self) -> usize {
        self.cluster_id
    }

    /// Ordered stops, depot first.
    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    /// Starting depot, or `None` for a route with no stops.
    pub fn depot(&self) -> Option<&str> {
        self.stops.first().map(String::as_str)
    }

    /// Sum of shortest-path costs between consecutive stops.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// How the sequence was obtained.
    pub fn completion(&self) -> Completion {
        self.completion
    }

    /// Consecutive `(from, to)` stop pairs.
    pub fn legs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.stops
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

/// A detailed road path between two consecutive route stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    /// Stop the segment leaves from.
    pub origin: String,
    /// Stop the segment arrives at.
    pub destination: String,
    /// Graph nodes traversed, `origin` first and `destination` last.
    pub nodes: Vec<String>,
    /// Sum of traversed edge weights.
    pub cost: f64,
    /// Nodes whose coordinates were missing during the search.
    ///
    /// Non-empty means the heuristic fell back to zero for them.
    pub missing_coordinates: Vec<String>,
}

impl PathSegment {
    /// Returns `true` if the heuristic ran with incomplete coordinates.
    pub fn is_degraded(&self) -> bool {
        !self.missing_coordinates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_accessors() {
        let route = Route::new(
            2,
            vec!["D".into(), "A".into(), "B".into()],
            3.0,
            Completion::Exhaustive,
        );
        assert_eq!(route.cluster_id(), 2);
        assert_eq!(route.depot(), Some("D"));
        assert_eq!(route.legs().collect::<Vec<_>>(), vec![("D", "A"), ("A", "B")]);
        assert!(route.completion().is_exhaustive());
    }

    #[test]
    fn test_depot_only_route_has_no_legs() {
        let route = Route::new(0, vec!["D".into()], 0.0, Completion::Exhaustive);
        assert_eq!(route.legs().count(), 0);
    }

    #[test]
    fn test_empty_route_has_no_depot() {
        let route = Route::new(0, Vec::new(), 0.0, Completion::Exhaustive);
        assert_eq!(route.depot(), None);
        assert_eq!(route.legs().count(), 0);

        let decoded: Route = serde_json::from_str(
            r#"{"cluster_id":1,"stops":[],"cost":0.0,"completion":"Exhaustive"}"#,
        )
        .expect("valid json");
        assert_eq!(decoded.depot(), None);
    }

    #[test]
    fn test_segment_degradation_flag() {
        let mut segment = PathSegment {
            origin: "A".into(),
            destination: "B".into(),
            nodes: vec!["A".into(), "B".into()],
            cost: 1.0,
            missing_coordinates: Vec::new(),
        };
        assert!(!segment.is_degraded());
        segment.missing_coordinates.push("B".into());
        assert!(segment.is_degraded());
    }
}
