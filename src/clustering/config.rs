//! Clustering parameters.

use serde::{Deserialize, Serialize};

/// How initial centroids are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Initialization {
    /// D²-weighted seeding (Arthur & Vassilvitskii, 2007).
    #[default]
    KMeansPlusPlus,
    /// k distinct orders drawn uniformly.
    RandomSample,
}

/// Configuration for [`KMeans`](super::KMeans).
///
/// # Examples
///
/// ```
/// use courier_routing::clustering::{Initialization, KMeansConfig};
///
/// let config = KMeansConfig::default()
///     .with_seed(7)
///     .with_restarts(3)
///     .with_init(Initialization::RandomSample);
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.max_iterations, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansConfig {
    /// Seed for the initialisation RNG.
    pub seed: u64,
    /// Cap on assignment/update rounds per restart.
    pub max_iterations: usize,
    /// Independent initialisations; the lowest inertia wins.
    pub restarts: usize,
    /// Centroid seeding strategy.
    pub init: Initialization,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_iterations: 300,
            restarts: 10,
            init: Initialization::KMeansPlusPlus,
        }
    }
}

impl KMeansConfig {
    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the iteration cap (at least 1).
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Sets the number of restarts (at least 1).
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts.max(1);
        self
    }

    /// Sets the initialisation strategy.
    pub fn with_init(mut self, init: Initialization) -> Self {
        self.init = init;
        self
    }
}
