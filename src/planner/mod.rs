//! Delivery planning pipeline.
//!
//! - [`Planner`]: clusters orders per courier, sequences each cluster
//!   exactly and expands every leg with A*
//! - [`DeliveryPlan`]: per-cluster outcomes with aggregate helpers

mod config;
mod pipeline;
mod plan;

pub use config::PlannerConfig;
pub use pipeline::Planner;
pub use plan::{ClusterOutcome, ClusterPlan, DeliveryPlan, PlannedRoute, SegmentOutcome};
