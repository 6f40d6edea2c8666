//! Error types.
//!
//! [`RoutingError`] covers structural problems that invalidate a whole build
//! or plan. [`NoPathFound`] and [`SequenceError`] are local to one unit of work
//! (a path query, a cluster) and are reported alongside successful results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural input errors. Returned before any search runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// An edge weight is negative, NaN, or infinite.
    #[error("invalid weight {weight} on edge {from} - {to}: weights must be finite and non-negative")]
    InvalidEdgeWeight {
        /// First endpoint.
        from: String,
        /// Second endpoint.
        to: String,
        /// The rejected weight.
        weight: f64,
    },
    /// An order references a location missing from the location table.
    #[error("order {order} references unknown location {location}")]
    UnknownOrderLocation {
        /// Order identifier.
        order: String,
        /// The unresolved location identifier.
        location: String,
    },
    /// Two orders share an identifier.
    #[error("order id {order} appears more than once")]
    DuplicateOrder {
        /// The repeated identifier.
        order: String,
    },
}

/// No path connects two nodes, or one of them is not in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("no path from {from} to {to}")]
pub struct NoPathFound {
    /// Origin node.
    pub from: String,
    /// Destination node.
    pub to: String,
}

impl NoPathFound {
    pub(crate) fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Why a cluster's stops could not be sequenced.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SequenceError {
    /// Every ordering contains an unreachable leg.
    #[error("no feasible route from {depot}: unreachable stops {unreachable:?}")]
    NoFeasibleRoute {
        /// The depot the route must start from.
        depot: String,
        /// Stops with no path from the depot.
        unreachable: Vec<String>,
    },
    /// The search budget ran out before any feasible ordering was evaluated.
    #[error("search budget exhausted after {evaluated} permutations without a feasible route")]
    BudgetExhausted {
        /// Permutations evaluated before stopping.
        evaluated: u64,
    },
}
