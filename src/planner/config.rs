//! Planner configuration.

use serde::{Deserialize, Serialize};

use crate::clustering::KMeansConfig;
use crate::sequencing::SequencerConfig;

/// Everything a planning run needs besides its input data.
///
/// # Examples
///
/// ```
/// use courier_routing::planner::PlannerConfig;
/// use courier_routing::sequencing::SequencerConfig;
///
/// let config = PlannerConfig::new("Depot", 3)
///     .with_seed(7)
///     .with_sequencing(SequencerConfig::default().with_max_permutations(50_000))
///     .with_parallel(false);
/// assert_eq!(config.courier_count, 3);
/// assert_eq!(config.clustering.seed, 7);
/// assert!(!config.parallel);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Location every route starts from.
    pub depot: String,
    /// Number of couriers, used as the cluster count.
    pub courier_count: usize,
    /// K-means settings.
    #[serde(default)]
    pub clustering: KMeansConfig,
    /// Search bounds for per-cluster sequencing.
    #[serde(default)]
    pub sequencing: SequencerConfig,
    /// Process clusters on the rayon thread pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl PlannerConfig {
    /// Configuration with default clustering, unbounded sequencing and
    /// parallel cluster processing.
    pub fn new(depot: impl Into<String>, courier_count: usize) -> Self {
        Self {
            depot: depot.into(),
            courier_count,
            clustering: KMeansConfig::default(),
            sequencing: SequencerConfig::default(),
            parallel: default_parallel(),
        }
    }

    /// Replaces the clustering settings.
    pub fn with_clustering(mut self, clustering: KMeansConfig) -> Self {
        self.clustering = clustering;
        self
    }

    /// Sets the clustering seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.clustering = self.clustering.with_seed(seed);
        self
    }

    /// Replaces the sequencing bounds.
    pub fn with_sequencing(mut self, sequencing: SequencerConfig) -> Self {
        self.sequencing = sequencing;
        self
    }

    /// Enables or disables parallel cluster processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
