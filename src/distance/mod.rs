//! Road cost matrices.
//!
//! Provides a dense shortest-path cost matrix over a depot and its stops.

mod matrix;

pub use matrix::CostMatrix;
