//! Initial centroid selection.

use rand::seq::index;
use rand::Rng;

use crate::models::Coordinates;

use super::Initialization;

/// Picks `k` initial centroids from `points` (`1 <= k <= points.len()`).
pub(crate) fn initial_centroids<R: Rng>(
    points: &[Coordinates],
    k: usize,
    init: Initialization,
    rng: &mut R,
) -> Vec<Coordinates> {
    match init {
        Initialization::RandomSample => index::sample(rng, points.len(), k)
            .into_iter()
            .map(|i| points[i])
            .collect(),
        Initialization::KMeansPlusPlus => plus_plus(points, k, rng),
    }
}

/// k-means++: each further centroid is drawn with probability proportional to
/// its squared distance from the nearest centroid chosen so far.
fn plus_plus<R: Rng>(points: &[Coordinates], k: usize, rng: &mut R) -> Vec<Coordinates> {
    let n = points.len();
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.random_range(0..n)]);

    let mut weights: Vec<f64> = points
        .iter()
        .map(|p| p.squared_distance_to(&centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f64 = weights.iter().sum();
        let chosen = if total > 0.0 {
            let threshold = rng.random::<f64>() * total;
            let mut cumulative = 0.0;
            let mut pick = None;
            for (i, &w) in weights.iter().enumerate() {
                if w <= 0.0 {
                    continue;
                }
                cumulative += w;
                pick = Some(i);
                if cumulative > threshold {
                    break;
                }
            }
            pick.unwrap_or(0)
        } else {
            // every point coincides with a centroid already
            rng.random_range(0..n)
        };

        let centroid = points[chosen];
        centroids.push(centroid);
        for (w, p) in weights.iter_mut().zip(points) {
            *w = w.min(p.squared_distance_to(&centroid));
        }
    }

    centroids
}
