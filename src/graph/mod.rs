//! Road graph and weight-only shortest paths.
//!
//! - [`RoadGraph`]: immutable undirected graph built from edge triplets
//! - [`shortest_path`]: Dijkstra (1959), O((V + E) log V)

mod dijkstra;
mod road_graph;
pub(crate) mod search;

pub(crate) use dijkstra::single_source_costs;
pub use dijkstra::shortest_path;
pub use road_graph::{Edge, RoadGraph};
pub use search::ShortestPath;
