//! Geographic grouping of orders into courier clusters.
//!
//! - [`KMeans`]: Lloyd's algorithm (1982) with seeded k-means++ or random
//!   initialisation and best-of-N restarts, O(restarts · iterations · n · k)
//! - [`assign_clusters`]: the same with [`KMeansConfig::default`]

mod config;
mod init;
mod kmeans;

pub use config::{Initialization, KMeansConfig};
pub use kmeans::{assign_clusters, GeoOrder, KMeans, KMeansModel};
