//! Detailed path expansion between route stops.
//!
//! - [`shortest_path_astar`]: A* (Hart, Nilsson & Raphael, 1968) with a
//!   straight-line heuristic
//! - [`EuclideanHeuristic`]: coordinate lookup that degrades to zero, and
//!   reports it, when a node has no coordinates

mod astar;
mod heuristic;

pub use astar::{shortest_path_astar, AStarPath};
pub use heuristic::EuclideanHeuristic;
