//! Planning results.

use serde::{Deserialize, Serialize};

use crate::error::{NoPathFound, SequenceError};
use crate::models::{ClusterAssignment, PathSegment, Route};

/// Expansion result for one leg of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SegmentOutcome {
    /// A* found a path.
    Found(PathSegment),
    /// The two stops are not connected.
    Missing(NoPathFound),
}

impl SegmentOutcome {
    /// The segment, if one was found.
    pub fn segment(&self) -> Option<&PathSegment> {
        match self {
            SegmentOutcome::Found(segment) => Some(segment),
            SegmentOutcome::Missing(_) => None,
        }
    }
}

/// A sequenced route together with its expanded legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRoute {
    /// Stop order and sequencing cost.
    pub route: Route,
    /// One entry per consecutive stop pair, in route order.
    pub segments: Vec<SegmentOutcome>,
}

impl PlannedRoute {
    /// Sum of the costs of every expanded leg.
    ///
    /// Equals [`Route::cost`] whenever every leg was found, since A* and the
    /// sequencer's Dijkstra costs agree.
    pub fn verified_cost(&self) -> f64 {
        self.segments
            .iter()
            .filter_map(SegmentOutcome::segment)
            .map(|s| s.cost)
            .sum()
    }

    /// Returns `true` if every leg was expanded.
    pub fn is_complete(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, SegmentOutcome::Found(_)))
    }
}

/// What happened to one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClusterOutcome {
    /// The cluster was sequenced and its legs expanded.
    Routed(PlannedRoute),
    /// No route could be built for the cluster.
    Infeasible(SequenceError),
}

/// Result for one non-empty cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPlan {
    /// Cluster id from the assignment.
    pub cluster_id: usize,
    /// Orders in the cluster, in input order.
    pub orders: Vec<String>,
    /// Routing result.
    pub outcome: ClusterOutcome,
}

/// Complete output of a planning run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeliveryPlan {
    /// Cluster of every order.
    pub assignment: ClusterAssignment,
    /// One entry per non-empty cluster, ascending by cluster id.
    pub clusters: Vec<ClusterPlan>,
}

impl DeliveryPlan {
    /// Routed clusters.
    pub fn routes(&self) -> impl Iterator<Item = &PlannedRoute> + '_ {
        self.clusters.iter().filter_map(|c| match &c.outcome {
            ClusterOutcome::Routed(route) => Some(route),
            ClusterOutcome::Infeasible(_) => None,
        })
    }

    /// Clusters that could not be routed, with the reason.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &SequenceError)> + '_ {
        self.clusters.iter().filter_map(|c| match &c.outcome {
            ClusterOutcome::Infeasible(err) => Some((c.cluster_id, err)),
            ClusterOutcome::Routed(_) => None,
        })
    }

    /// Sum of sequencing costs over routed clusters.
    pub fn total_cost(&self) -> f64 {
        self.routes().map(|r| r.route.cost()).sum()
    }

    /// Every node searched without coordinates, sorted and deduplicated.
    pub fn degraded_nodes(&self) -> Vec<&str> {
        let mut nodes: Vec<&str> = self
            .routes()
            .flat_map(|r| r.segments.iter())
            .filter_map(SegmentOutcome::segment)
            .flat_map(|s| s.missing_coordinates.iter().map(String::as_str))
            .collect();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Completion;

    fn segment(from: &str, to: &str, cost: f64, missing: &[&str]) -> SegmentOutcome {
        SegmentOutcome::Found(PathSegment {
            origin: from.into(),
            destination: to.into(),
            nodes: vec![from.into(), to.into()],
            cost,
            missing_coordinates: missing.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn sample_plan() -> DeliveryPlan {
        let routed = PlannedRoute {
            route: Route::new(
                0,
                vec!["D".into(), "A".into(), "B".into()],
                3.0,
                Completion::Exhaustive,
            ),
            segments: vec![segment("D", "A", 1.0, &["A"]), segment("A", "B", 2.0, &["A"])],
        };
        DeliveryPlan {
            assignment: ClusterAssignment::empty(),
            clusters: vec![
                ClusterPlan {
                    cluster_id: 0,
                    orders: vec!["o1".into(), "o2".into()],
                    outcome: ClusterOutcome::Routed(routed),
                },
                ClusterPlan {
                    cluster_id: 1,
                    orders: vec!["o3".into()],
                    outcome: ClusterOutcome::Infeasible(SequenceError::NoFeasibleRoute {
                        depot: "D".into(),
                        unreachable: vec!["Z".into()],
                    }),
                },
            ],
        }
    }

    #[test]
    fn test_plan_helpers() {
        let plan = sample_plan();
        assert_eq!(plan.routes().count(), 1);
        assert_eq!(plan.failures().map(|(id, _)| id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(plan.total_cost(), 3.0);
        assert_eq!(plan.degraded_nodes(), vec!["A"]);
    }

    #[test]
    fn test_verified_cost_skips_missing_legs() {
        let mut route = PlannedRoute {
            route: Route::new(0, vec!["D".into(), "A".into()], 1.0, Completion::Exhaustive),
            segments: vec![segment("D", "A", 1.0, &[])],
        };
        assert!(route.is_complete());
        assert_eq!(route.verified_cost(), 1.0);

        route
            .segments
            .push(SegmentOutcome::Missing(NoPathFound::new("A", "Z")));
        assert!(!route.is_complete());
        assert_eq!(route.verified_cost(), 1.0);
    }

    #[test]
    fn test_empty_plan() {
        let plan = DeliveryPlan::default();
        assert_eq!(plan.total_cost(), 0.0);
        assert!(plan.degraded_nodes().is_empty());
    }
}
