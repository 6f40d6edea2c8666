//! Geographic order clustering.
//!
//! # Algorithm
//!
//! Lloyd's iteration on order coordinates:
//!
//! 1. Seed `k' = min(k, n)` centroids from a seeded RNG.
//! 2. Assign every order to its nearest centroid (exact ties go to the lower
//!    centroid index).
//! 3. Move each centroid to the mean of its orders; a centroid with no orders
//!    stays where it is.
//! 4. Repeat 2–3 until no assignment changes or the iteration cap is hit.
//!
//! The whole procedure is restarted `restarts` times from the same RNG stream
//! and the run with the lowest inertia (sum of squared distances to assigned
//! centroids) is kept; the earliest run wins ties.
//!
//! # Complexity
//!
//! O(restarts · iterations · n · k).
//!
//! # Reference
//!
//! Lloyd, S.P. (1982). "Least squares quantization in PCM", *IEEE
//! Transactions on Information Theory* 28(2), 129-137.
//!
//! Arthur, D. & Vassilvitskii, S. (2007). "k-means++: The Advantages of
//! Careful Seeding", *SODA '07*, 1027-1035.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{ClusterAssignment, Coordinates};

use super::init::initial_centroids;
use super::KMeansConfig;

/// An order reduced to what clustering needs: its id and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoOrder {
    /// Order identifier.
    pub id: String,
    /// Delivery position.
    pub position: Coordinates,
}

impl GeoOrder {
    /// Creates a geo-located order.
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            position: Coordinates::new(x, y),
        }
    }
}

/// A fitted clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansModel {
    /// Cluster of every order, in input order.
    pub assignment: ClusterAssignment,
    /// Final centroid of every cluster, indexed by cluster id.
    pub centroids: Vec<Coordinates>,
    /// Sum of squared distances from orders to their centroids.
    pub inertia: f64,
    /// Assignment passes performed by the winning restart.
    pub iterations: usize,
    /// `false` if the winning restart stopped at the iteration cap.
    pub converged: bool,
}

/// Seeded, deterministic K-means.
///
/// # Examples
///
/// ```
/// use courier_routing::clustering::{GeoOrder, KMeans, KMeansConfig};
///
/// let orders = vec![
///     GeoOrder::new("o1", 0.0, 0.0),
///     GeoOrder::new("o2", 0.5, 0.5),
///     GeoOrder::new("o3", 20.0, 20.0),
///     GeoOrder::new("o4", 20.5, 20.0),
/// ];
/// let assignment = KMeans::new(KMeansConfig::default()).assign(&orders, 2);
/// assert_eq!(assignment.len(), 4);
/// assert_eq!(assignment.cluster_of("o1"), assignment.cluster_of("o2"));
/// assert_ne!(assignment.cluster_of("o1"), assignment.cluster_of("o3"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct KMeans {
    config: KMeansConfig,
}

struct Run {
    labels: Vec<usize>,
    centroids: Vec<Coordinates>,
    inertia: f64,
    iterations: usize,
    converged: bool,
}

impl KMeans {
    /// Creates a clusterer.
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    /// Partitions `orders` into at most `k` clusters.
    ///
    /// Returns an empty assignment when there are no orders or `k == 0`.
    pub fn assign(&self, orders: &[GeoOrder], k: usize) -> ClusterAssignment {
        self.fit(orders, k)
            .map(|model| model.assignment)
            .unwrap_or_default()
    }

    /// Fits a model, or returns `None` when the effective cluster count is 0.
    pub fn fit(&self, orders: &[GeoOrder], k: usize) -> Option<KMeansModel> {
        let k = k.min(orders.len());
        if k == 0 {
            debug!(orders = orders.len(), "nothing to cluster");
            return None;
        }

        let points: Vec<Coordinates> = orders.iter().map(|o| o.position).collect();
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let restarts = self.config.restarts.max(1);
        let max_iterations = self.config.max_iterations.max(1);

        let mut best: Option<Run> = None;
        for restart in 0..restarts {
            let seeds = initial_centroids(&points, k, self.config.init, &mut rng);
            let run = lloyd(&points, seeds, max_iterations);
            debug!(restart, inertia = run.inertia, iterations = run.iterations, "k-means run");
            if best.as_ref().map_or(true, |b| run.inertia < b.inertia) {
                best = Some(run);
            }
        }
        let best = best?;

        let entries = orders
            .iter()
            .zip(&best.labels)
            .map(|(order, &label)| (order.id.clone(), label))
            .collect();
        let assignment = ClusterAssignment::new(k, entries);

        info!(
            orders = orders.len(),
            clusters = k,
            inertia = best.inertia,
            "orders grouped into clusters"
        );

        Some(KMeansModel {
            assignment,
            centroids: best.centroids,
            inertia: best.inertia,
            iterations: best.iterations,
            converged: best.converged,
        })
    }
}

/// Clusters `orders` with the default configuration.
pub fn assign_clusters(orders: &[GeoOrder], k: usize) -> ClusterAssignment {
    KMeans::default().assign(orders, k)
}

fn lloyd(points: &[Coordinates], mut centroids: Vec<Coordinates>, max_iterations: usize) -> Run {
    let mut labels = vec![usize::MAX; points.len()];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < max_iterations {
        iterations += 1;
        if !assign_step(points, &centroids, &mut labels) {
            converged = true;
            break;
        }
        update_step(points, &labels, &mut centroids);
    }
    if !converged {
        // labels must describe the centroids we return
        assign_step(points, &centroids, &mut labels);
    }

    let inertia = points
        .iter()
        .zip(&labels)
        .map(|(p, &c)| p.squared_distance_to(&centroids[c]))
        .sum();

    Run {
        labels,
        centroids,
        inertia,
        iterations,
        converged,
    }
}

/// Reassigns every point; returns `true` if any label changed.
fn assign_step(points: &[Coordinates], centroids: &[Coordinates], labels: &mut [usize]) -> bool {
    let mut changed = false;
    for (point, label) in points.iter().zip(labels.iter_mut()) {
        let nearest = nearest_centroid(point, centroids);
        if *label != nearest {
            *label = nearest;
            changed = true;
        }
    }
    changed
}

fn update_step(points: &[Coordinates], labels: &[usize], centroids: &mut [Coordinates]) {
    let k = centroids.len();
    let mut sums = vec![(0.0, 0.0); k];
    let mut counts = vec![0usize; k];
    for (point, &label) in points.iter().zip(labels) {
        sums[label].0 += point.x;
        sums[label].1 += point.y;
        counts[label] += 1;
    }
    for ((centroid, (sx, sy)), count) in centroids.iter_mut().zip(sums).zip(counts) {
        if count > 0 {
            *centroid = Coordinates::new(sx / count as f64, sy / count as f64);
        }
    }
}

/// Index of the closest centroid; the lowest index wins exact ties.
fn nearest_centroid(point: &Coordinates, centroids: &[Coordinates]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let d = point.squared_distance_to(centroid);
        if d < best_dist {
            best = i;
            best_dist = d;
        }
    }
    best
}
