pub mod error;
pub mod ml;

pub use error::{Error, Result};
pub use ml::classic::k_means::{
    kmeans, kmeans_from_centroids, kmeans_with_rng, EmptyClusterPolicy, KMeansConfig,
    KMeansResult,
};
