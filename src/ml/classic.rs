pub mod k_means;

// Re-export public types and functions
pub use k_means::{
    kmeans, kmeans_from_centroids, kmeans_with_rng, Dataset, EmptyClusterPolicy, KMeansConfig,
    KMeansResult, Partition,
};
