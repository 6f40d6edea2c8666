//! Order-to-cluster assignment.

use serde::{Deserialize, Serialize};

/// Mapping from order identifier to cluster id in `0..num_clusters`.
///
/// Entries keep the order of the clustered input. Cluster ids are dense but a
/// cluster may have no members when its centroid degenerates.
///
/// # Examples
///
/// ```
/// use courier_routing::models::ClusterAssignment;
///
/// let assignment = ClusterAssignment::empty();
/// assert!(assignment.is_empty());
/// assert_eq!(assignment.num_clusters(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClusterAssignment {
    num_clusters: usize,
    entries: Vec<(String, usize)>,
}

impl ClusterAssignment {
    /// Assignment of nothing to nothing, the result of clustering zero orders.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(num_clusters: usize, entries: Vec<(String, usize)>) -> Self {
        debug_assert!(entries.iter().all(|(_, c)| *c < num_clusters));
        Self {
            num_clusters,
            entries,
        }
    }

    /// Effective cluster count `k' = min(k, orders)`.
    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    /// Number of assigned orders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no order was assigned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cluster of the given order.
    pub fn cluster_of(&self, order_id: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(id, _)| id == order_id)
            .map(|&(_, cluster)| cluster)
    }

    /// Orders assigned to `cluster`, in input order.
    pub fn members(&self, cluster: usize) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, c)| *c == cluster)
            .map(|(id, _)| id.as_str())
            .collect()
    }

    /// Member count of every cluster, indexed by cluster id.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_clusters];
        for &(_, cluster) in &self.entries {
            sizes[cluster] += 1;
        }
        sizes
    }

    /// Ids of clusters with at least one member, ascending.
    pub fn non_empty_clusters(&self) -> Vec<usize> {
        self.sizes()
            .iter()
            .enumerate()
            .filter(|(_, &size)| size > 0)
            .map(|(cluster, _)| cluster)
            .collect()
    }

    /// `(order_id, cluster_id)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries.iter().map(|(id, c)| (id.as_str(), *c))
    }
}
