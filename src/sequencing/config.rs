//! Sequencer search bounds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Optional bounds on the factorial search.
///
/// With no bounds the search is exhaustive and the result optimal.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use courier_routing::sequencing::SequencerConfig;
///
/// let config = SequencerConfig::default()
///     .with_max_permutations(10_000)
///     .with_time_limit(Duration::from_millis(50));
/// assert_eq!(config.max_permutations, Some(10_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Stop after evaluating this many orderings.
    pub max_permutations: Option<u64>,
    /// Stop after this much wall-clock time.
    pub time_limit: Option<Duration>,
}

impl SequencerConfig {
    /// Caps the number of evaluated orderings.
    pub fn with_max_permutations(mut self, max: u64) -> Self {
        self.max_permutations = Some(max);
        self
    }

    /// Caps the wall-clock time spent searching.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}
