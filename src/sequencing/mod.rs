//! Exact stop sequencing.
//!
//! - [`RouteSequencer`]: cheapest depot-first visiting order over road costs
//! - [`Permutations`]: lazy, restartable lexicographic ordering generator

mod config;
mod exact;
mod permutations;

pub use crate::models::Completion;
pub use config::SequencerConfig;
pub use exact::{sequence_stops, RouteSequencer, StopSequence};
pub use permutations::Permutations;
