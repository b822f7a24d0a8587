use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the clustering engine.
///
/// Every variant except `EmptyCluster` and `DidNotConverge` is a precondition
/// violation, detected before seeding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("empty dataset provided")]
    EmptyDataset,

    #[error("data points must have at least one dimension")]
    ZeroDimension,

    /// `index` refers to the dataset vector, or to the initial centroid when
    /// centroids are supplied by the caller.
    #[error("dimension mismatch at index {index}: expected {expected}, found {found}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("vector at index {index} contains a non-finite coordinate")]
    NonFiniteValue { index: usize },

    #[error("invalid number of clusters k = {k} for dataset of size {n}")]
    InvalidK { k: usize, n: usize },

    #[error("invalid convergence threshold {0}: must be finite and non-negative")]
    InvalidEpsilon(f64),

    #[error("expected {expected} initial centroids, found {found}")]
    CentroidCountMismatch { expected: usize, found: usize },

    #[error("cluster {cluster} has no members at iteration {iteration}")]
    EmptyCluster { cluster: usize, iteration: usize },

    #[error("did not converge after {iterations} iterations")]
    DidNotConverge { iterations: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::InvalidK { k: 5, n: 2 }.to_string(),
            "invalid number of clusters k = 5 for dataset of size 2"
        );
        assert_eq!(
            Error::DimensionMismatch {
                index: 3,
                expected: 2,
                found: 1
            }
            .to_string(),
            "dimension mismatch at index 3: expected 2, found 1"
        );
        assert_eq!(
            Error::DidNotConverge { iterations: 10 }.to_string(),
            "did not converge after 10 iterations"
        );
    }
}
