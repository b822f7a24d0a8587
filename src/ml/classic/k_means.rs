//! Lloyd's k-means clustering.
//!
//! Partitions a set of n-dimensional vectors into `k` clusters so that every
//! vector belongs to the cluster with the nearest centroid, where each centroid
//! is the mean of its members.
//!
//! # Algorithm
//!
//! 1. **Seed**: pick `k` dataset vectors uniformly at random, with replacement.
//! 2. **Assign**: each vector goes to its nearest centroid (ties to the lower index).
//! 3. **Update**: each centroid becomes the coordinate-wise mean of its members.
//! 4. **Check**: stop once no centroid moved more than `epsilon`, otherwise go to 2.
//!
//! Distances are Euclidean. Squared distances are used to rank centroids, but
//! `epsilon` is always compared against the true distance.
//!
//! # Empty clusters
//!
//! A cluster that receives no members has no mean. [`EmptyClusterPolicy`]
//! decides what happens: fail the run, or reseed that centroid from a random
//! dataset vector and keep iterating.

pub mod dataset;
pub mod distance;
pub mod seeding;
pub mod step;

use num_traits::Float;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{Error, Result};
pub use dataset::Dataset;
pub use step::{Partition, Update};

/// What to do when a cluster ends an assignment step with no members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyClusterPolicy {
    /// Abort the run with [`Error::EmptyCluster`].
    Fail,
    /// Replace the centroid with a dataset vector drawn from the run's RNG.
    #[default]
    Reseed,
}

/// Configuration options for k-means clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Number of clusters to find.
    pub k: usize,
    /// Convergence threshold. The run stops once no centroid moves further than this.
    pub epsilon: f64,
    /// Iteration cap. `None` iterates until convergence with no bound.
    pub max_iterations: Option<usize>,
    /// Handling of clusters left without members.
    pub empty_cluster: EmptyClusterPolicy,
    /// Seed for the internal RNG. `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Run the assignment and update steps on the rayon thread pool.
    pub parallel: bool,
}

impl KMeansConfig {
    /// Create a new config with default values for epsilon (1e-3), max_iterations (300),
    /// empty cluster handling (reseed) and no fixed seed.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            epsilon: 1e-3,
            max_iterations: Some(300),
            empty_cluster: EmptyClusterPolicy::default(),
            seed: None,
            parallel: false,
        }
    }

    /// Customize the convergence threshold.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Customize the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Iterate until convergence, however long it takes.
    pub fn without_iteration_limit(mut self) -> Self {
        self.max_iterations = None;
        self
    }

    pub fn with_empty_cluster_policy(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster = policy;
        self
    }

    /// Fix the RNG seed so repeated runs give identical results.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn validate(&self, n: usize) -> Result<()> {
        if self.k == 0 || self.k > n {
            return Err(Error::InvalidK { k: self.k, n });
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(Error::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// Outcome of a converged run.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult<'a, T> {
    /// Input vectors grouped by cluster, in dataset order within each cluster.
    pub clusters: Vec<Vec<&'a [T]>>,
    /// Final centroids, positionally matching `clusters`.
    pub centroids: Vec<Vec<T>>,
    /// Cluster index of every input vector.
    pub assignments: Vec<usize>,
    /// Number of assign/update/check rounds performed.
    pub iterations: usize,
    /// Largest centroid movement in the final round. Never exceeds epsilon.
    pub max_movement: T,
}

impl<T: Float> KMeansResult<'_, T> {
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Within-cluster sum of squared distances to the final centroids.
    pub fn inertia(&self) -> T {
        self.clusters
            .iter()
            .zip(&self.centroids)
            .flat_map(|(members, c)| {
                members
                    .iter()
                    .map(move |p| distance::squared_euclidean(p, c))
            })
            .fold(T::zero(), |acc, d| acc + d)
    }
}

/// Runs k-means clustering on the provided dataset.
///
/// Seeding uses a ChaCha RNG built from `config.seed`, or from OS entropy when
/// no seed is set.
///
/// # Arguments
///
/// - `data`: The data points. Every point must have the same, non-zero dimension.
/// - `config`: KMeansConfig specifying the number of clusters (k), epsilon, etc.
///
/// # Errors
///
/// - [`Error::EmptyDataset`], [`Error::ZeroDimension`], [`Error::DimensionMismatch`]
///   or [`Error::NonFiniteValue`] for malformed input.
/// - [`Error::InvalidK`] if `k` is 0 or greater than the number of points.
/// - [`Error::InvalidEpsilon`] if epsilon is negative or not finite.
/// - [`Error::EmptyCluster`] under [`EmptyClusterPolicy::Fail`].
/// - [`Error::DidNotConverge`] when `max_iterations` runs out.
///
/// # Example
///
/// ```
/// use lloyd::{kmeans, KMeansConfig};
///
/// let data = vec![
///     vec![1.0, 1.0],
///     vec![2.0, 2.0],
///     vec![9.0, 8.0],
///     vec![10.0, 9.0],
/// ];
///
/// let config = KMeansConfig::new(2).with_seed(42);
/// let result = kmeans(&data, &config).unwrap();
///
/// assert_eq!(result.centroids.len(), 2);
/// assert_eq!(result.clusters.iter().map(Vec::len).sum::<usize>(), 4);
/// ```
pub fn kmeans<'a, T>(data: &'a [Vec<T>], config: &KMeansConfig) -> Result<KMeansResult<'a, T>>
where
    T: Float + Send + Sync,
{
    let mut rng = config.rng();
    kmeans_with_rng(data, config, &mut rng)
}

/// Like [`kmeans`], but draws seeding and reseeding choices from `rng`.
///
/// `config.seed` is ignored.
pub fn kmeans_with_rng<'a, T, R>(
    data: &'a [Vec<T>],
    config: &KMeansConfig,
    rng: &mut R,
) -> Result<KMeansResult<'a, T>>
where
    T: Float + Send + Sync,
    R: Rng + ?Sized,
{
    let dataset = Dataset::new(data)?;
    config.validate(dataset.len())?;
    let centroids = seeding::random_with_replacement(&dataset, config.k, &mut *rng);
    lloyd(dataset, centroids, config, rng)
}

/// Like [`kmeans`], but starts from caller-supplied centroids instead of
/// random seeding.
///
/// # Errors
///
/// In addition to the errors of [`kmeans`]:
/// - [`Error::CentroidCountMismatch`] if `initial_centroids.len() != config.k`.
/// - [`Error::DimensionMismatch`] or [`Error::NonFiniteValue`] for a bad centroid,
///   with `index` naming the centroid.
pub fn kmeans_from_centroids<'a, T>(
    data: &'a [Vec<T>],
    initial_centroids: Vec<Vec<T>>,
    config: &KMeansConfig,
) -> Result<KMeansResult<'a, T>>
where
    T: Float + Send + Sync,
{
    let dataset = Dataset::new(data)?;
    config.validate(dataset.len())?;
    if initial_centroids.len() != config.k {
        return Err(Error::CentroidCountMismatch {
            expected: config.k,
            found: initial_centroids.len(),
        });
    }
    dataset::check_vectors(&initial_centroids, dataset.dim())?;
    let mut rng = config.rng();
    lloyd(dataset, initial_centroids, config, &mut rng)
}

/// The assign/update/check loop, starting from already seeded centroids.
fn lloyd<'a, T, R>(
    data: Dataset<'a, T>,
    mut centroids: Vec<Vec<T>>,
    config: &KMeansConfig,
    rng: &mut R,
) -> Result<KMeansResult<'a, T>>
where
    T: Float + Send + Sync,
    R: Rng + ?Sized,
{
    let epsilon = T::from(config.epsilon).ok_or(Error::InvalidEpsilon(config.epsilon))?;
    let mut iteration = 0;

    loop {
        if let Some(max) = config.max_iterations {
            if iteration >= max {
                log::warn!("k-means did not converge within {} iterations", max);
                return Err(Error::DidNotConverge {
                    iterations: iteration,
                });
            }
        }
        iteration += 1;

        let partition = step::assign(&data, &centroids, config.parallel);
        let step::Update {
            centroids: next,
            reseeded,
        } = step::update(
            &data,
            &partition,
            config.empty_cluster,
            iteration,
            config.parallel,
            &mut *rng,
        )?;
        let movement = step::max_movement(&centroids, &next);
        log::debug!(
            "iteration {}: max centroid movement {:?}",
            iteration,
            movement.to_f64()
        );

        // A reseeded centroid has not been through an assignment yet.
        if reseeded.is_empty() && step::has_converged(&centroids, &next, epsilon) {
            log::info!(
                "k-means converged after {} iterations (k = {}, n = {})",
                iteration,
                config.k,
                data.len()
            );
            let (members, assignments) = partition.into_parts();
            let clusters = members
                .iter()
                .map(|m| m.iter().map(|&i| data.get(i)).collect())
                .collect();
            return Ok(KMeansResult {
                clusters,
                centroids: next,
                assignments,
                iterations: iteration,
                max_movement: movement,
            });
        }
        centroids = next;
    }
}
