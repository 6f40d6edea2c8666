//! # courier-routing
//!
//! Courier delivery planning over a weighted road network: orders are grouped
//! per courier by location, each group is put in the cheapest visiting order
//! from the depot, and every leg is expanded into a concrete road path.
//!
//! ## Modules
//!
//! - [`models`]: Domain records (Location, Order, ClusterAssignment, Route, PathSegment)
//! - [`graph`]: Road graph construction and Dijkstra shortest paths
//! - [`pathfinding`]: A* with a Euclidean heuristic over location coordinates
//! - [`clustering`]: Seeded K-means assignment of orders to couriers
//! - [`distance`]: Shortest-path cost matrix between stops
//! - [`sequencing`]: Exact stop ordering by lazy permutation search
//! - [`planner`]: The end-to-end pipeline and its report
//! - [`error`]: Error types

pub mod clustering;
pub mod distance;
pub mod error;
pub mod graph;
pub mod models;
pub mod pathfinding;
pub mod planner;
pub mod sequencing;

pub use error::{NoPathFound, RoutingError, SequenceError};
