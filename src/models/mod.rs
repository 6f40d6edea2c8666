//! Domain model types for courier routing.
//!
//! Provides the boundary records exchanged with loading and reporting code:
//! locations with coordinates, orders, cluster assignments, routes as ordered
//! stop sequences, and detailed path segments.

mod assignment;
mod location;
mod order;
mod route;

pub use assignment::ClusterAssignment;
pub use location::{CoordinateTable, Coordinates, Location};
pub use order::Order;
pub use route::{Completion, PathSegment, Route};
