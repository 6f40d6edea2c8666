//! End-to-end delivery planning.
//!
//! # Algorithm
//!
//! 1. Resolve every order to its location coordinates.
//! 2. Group orders into `courier_count` clusters with [`KMeans`].
//! 3. Sequence the delivery locations of each non-empty cluster from the
//!    depot with the exact [`RouteSequencer`].
//! 4. Expand every consecutive stop pair into a road path with
//!    [`shortest_path_astar`].
//!
//! Clusters are independent once assigned and run on the rayon pool unless
//! disabled. Failures in one cluster never affect another.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::clustering::{GeoOrder, KMeans};
use crate::error::RoutingError;
use crate::graph::RoadGraph;
use crate::models::{CoordinateTable, Location, Order, Route};
use crate::pathfinding::shortest_path_astar;
use crate::sequencing::RouteSequencer;

use super::{
    ClusterOutcome, ClusterPlan, DeliveryPlan, PlannedRoute, PlannerConfig, SegmentOutcome,
};

/// Plans courier routes over a road network.
///
/// # Examples
///
/// ```
/// use courier_routing::graph::RoadGraph;
/// use courier_routing::models::{Location, Order};
/// use courier_routing::planner::{Planner, PlannerConfig};
///
/// let graph = RoadGraph::build([("D", "A", 1.0), ("D", "B", 2.0), ("A", "B", 1.0)]).unwrap();
/// let locations = [
///     Location::new("D", 0.0, 0.0),
///     Location::new("A", 1.0, 0.0),
///     Location::new("B", 1.0, 1.0),
/// ];
/// let orders = [Order::new("o1", "A"), Order::new("o2", "B")];
///
/// let plan = Planner::new(PlannerConfig::new("D", 1))
///     .plan(&graph, &locations, &orders)
///     .unwrap();
/// let route = plan.routes().next().unwrap();
/// assert_eq!(route.route.stops(), ["D", "A", "B"]);
/// assert_eq!(route.verified_cost(), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Creates a planner.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Clusters, sequences and expands `orders`.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::UnknownOrderLocation`] if an order's location is not
    ///   in `locations`.
    /// - [`RoutingError::DuplicateOrder`] if two orders share an id.
    ///
    /// Unreachable stops and disconnected legs are not errors; they are
    /// recorded per cluster and per segment in the returned plan.
    pub fn plan(
        &self,
        graph: &RoadGraph,
        locations: &[Location],
        orders: &[Order],
    ) -> Result<DeliveryPlan, RoutingError> {
        let coordinates = CoordinateTable::from_locations(locations);
        let geo_orders = resolve_orders(orders, &coordinates)?;

        if self.config.courier_count == 0 && !orders.is_empty() {
            warn!(orders = orders.len(), "no couriers configured; nothing is routed");
        }
        let kmeans = KMeans::new(self.config.clustering.clone());
        let assignment = kmeans.assign(&geo_orders, self.config.courier_count);

        let location_of: HashMap<&str, &str> =
            orders.iter().map(|o| (o.id(), o.location_id())).collect();
        let members: Vec<(usize, Vec<String>)> = assignment
            .non_empty_clusters()
            .into_iter()
            .map(|c| (c, assignment.members(c).into_iter().map(String::from).collect()))
            .collect();

        let sequencer = RouteSequencer::new(self.config.sequencing.clone());
        let ctx = ClusterContext {
            depot: &self.config.depot,
            graph,
            coordinates: &coordinates,
            location_of: &location_of,
            sequencer: &sequencer,
        };

        let clusters: Vec<ClusterPlan> = if self.config.parallel {
            members
                .into_par_iter()
                .map(|(id, orders)| ctx.plan_cluster(id, orders))
                .collect()
        } else {
            members
                .into_iter()
                .map(|(id, orders)| ctx.plan_cluster(id, orders))
                .collect()
        };

        let plan = DeliveryPlan {
            assignment,
            clusters,
        };
        log_summary(&plan);
        Ok(plan)
    }
}

/// Read-only inputs shared by every cluster.
struct ClusterContext<'a> {
    depot: &'a str,
    graph: &'a RoadGraph,
    coordinates: &'a CoordinateTable,
    location_of: &'a HashMap<&'a str, &'a str>,
    sequencer: &'a RouteSequencer,
}

impl ClusterContext<'_> {
    fn plan_cluster(&self, cluster_id: usize, orders: Vec<String>) -> ClusterPlan {
        let stops: Vec<&str> = orders
            .iter()
            .filter_map(|o| self.location_of.get(o.as_str()).copied())
            .collect();

        let outcome = match self.sequencer.sequence(self.depot, &stops, self.graph) {
            Ok(sequence) => {
                debug!(
                    cluster_id,
                    stops = ?sequence.stops,
                    cost = sequence.cost,
                    "cluster sequenced"
                );
                let route = Route::new(
                    cluster_id,
                    sequence.stops,
                    sequence.cost,
                    sequence.completion,
                );
                let segments = self.expand(&route);
                ClusterOutcome::Routed(PlannedRoute { route, segments })
            }
            Err(err) => {
                warn!(cluster_id, error = %err, "cluster could not be routed");
                ClusterOutcome::Infeasible(err)
            }
        };

        ClusterPlan {
            cluster_id,
            orders,
            outcome,
        }
    }

    fn expand(&self, route: &Route) -> Vec<SegmentOutcome> {
        route
            .legs()
            .map(|(from, to)| self.expand_leg(from, to))
            .collect()
    }

    fn expand_leg(&self, from: &str, to: &str) -> SegmentOutcome {
        match shortest_path_astar(self.graph, from, to, self.coordinates) {
            Ok(found) => {
                debug!(
                    from,
                    to,
                    cost = found.path.cost,
                    expanded = found.expanded,
                    "segment expanded"
                );
                SegmentOutcome::Found(found.into_segment())
            }
            Err(err) => {
                warn!(from, to, "segment has no path");
                SegmentOutcome::Missing(err)
            }
        }
    }
}

/// Joins orders with coordinates, rejecting unknown locations and repeated ids.
fn resolve_orders(
    orders: &[Order],
    coordinates: &CoordinateTable,
) -> Result<Vec<GeoOrder>, RoutingError> {
    let mut seen = HashSet::with_capacity(orders.len());
    orders
        .iter()
        .map(|order| {
            if !seen.insert(order.id()) {
                return Err(RoutingError::DuplicateOrder {
                    order: order.id().to_string(),
                });
            }
            let position = coordinates.get(order.location_id()).ok_or_else(|| {
                RoutingError::UnknownOrderLocation {
                    order: order.id().to_string(),
                    location: order.location_id().to_string(),
                }
            })?;
            Ok(GeoOrder {
                id: order.id().to_string(),
                position,
            })
        })
        .collect()
}

fn log_summary(plan: &DeliveryPlan) {
    let routed = plan.routes().count();
    let degraded = plan.degraded_nodes();
    if !degraded.is_empty() {
        warn!(?degraded, "paths searched with incomplete coordinates");
    }
    info!(
        orders = plan.assignment.len(),
        clusters = plan.clusters.len(),
        routed,
        infeasible = plan.clusters.len() - routed,
        total_cost = plan.total_cost(),
        "delivery plan built"
    );
}
