//! The three phases of one Lloyd iteration: assignment, update and the
//! convergence check.
//!
//! Every function here is pure with respect to its inputs: each iteration
//! builds a fresh [`Partition`] and a fresh centroid set, and the previous
//! centroids are passed in explicitly rather than mutated.

use num_traits::Float;
use rand::Rng;
use rayon::prelude::*;

use super::dataset::Dataset;
use super::distance::{euclidean, squared_euclidean};
use super::EmptyClusterPolicy;
use crate::error::{Error, Result};

/// Assignment of every dataset vector to exactly one of `k` clusters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Dataset indices per cluster, in dataset order.
    members: Vec<Vec<usize>>,
    /// Cluster index per dataset vector.
    assignments: Vec<usize>,
}

impl Partition {
    /// Builds a partition from per-point cluster indices.
    ///
    /// # Panics
    ///
    /// If any assignment is `>= k`.
    pub(crate) fn from_assignments(assignments: Vec<usize>, k: usize) -> Self {
        let mut members = vec![Vec::new(); k];
        for (i, &c) in assignments.iter().enumerate() {
            members[c].push(i);
        }
        Self {
            members,
            assignments,
        }
    }

    pub fn k(&self) -> usize {
        self.members.len()
    }

    pub fn members(&self) -> &[Vec<usize>] {
        &self.members
    }

    pub fn assignments(&self) -> &[usize] {
        &self.assignments
    }

    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.members.iter().map(Vec::len).collect()
    }

    pub(crate) fn into_parts(self) -> (Vec<Vec<usize>>, Vec<usize>) {
        (self.members, self.assignments)
    }
}

/// Index of the centroid closest to `point`.
///
/// Centroids are scanned in index order and only a strictly smaller distance
/// replaces the current best, so ties go to the lower index.
pub fn nearest_centroid<T: Float>(point: &[T], centroids: &[Vec<T>]) -> usize {
    let mut best = 0;
    let mut best_dist = T::infinity();
    for (i, c) in centroids.iter().enumerate() {
        let d = squared_euclidean(point, c);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Assignment step: maps every vector to its nearest centroid.
pub fn assign<T>(data: &Dataset<'_, T>, centroids: &[Vec<T>], parallel: bool) -> Partition
where
    T: Float + Send + Sync,
{
    let assignments: Vec<usize> = if parallel {
        data.points()
            .par_iter()
            .map(|p| nearest_centroid(p, centroids))
            .collect()
    } else {
        data.iter().map(|p| nearest_centroid(p, centroids)).collect()
    };
    Partition::from_assignments(assignments, centroids.len())
}

/// Coordinate-wise arithmetic mean of `points`, or `None` when there are none.
///
/// A coordinate whose plain sum overflows is recomputed as a sum of
/// `x / count` terms, which stays finite for finite inputs.
pub fn mean<'a, T, I>(points: I) -> Option<Vec<T>>
where
    T: Float + 'a,
    I: IntoIterator<Item = &'a [T]>,
{
    let points: Vec<&[T]> = points.into_iter().collect();
    let first = points.first()?;
    let n = T::from(points.len())?;
    let mut sum = first.to_vec();
    for p in &points[1..] {
        for (s, &x) in sum.iter_mut().zip(p.iter()) {
            *s = *s + x;
        }
    }
    Some(
        sum.into_iter()
            .enumerate()
            .map(|(d, s)| {
                if s.is_finite() {
                    s / n
                } else {
                    points.iter().fold(T::zero(), |acc, p| acc + p[d] / n)
                }
            })
            .collect(),
    )
}

/// Centroids produced by one update step.
#[derive(Debug, Clone, PartialEq)]
pub struct Update<T> {
    pub centroids: Vec<Vec<T>>,
    /// Clusters whose centroid was moved onto a dataset vector because they
    /// had no members. A round that reseeded anything has not converged.
    pub reseeded: Vec<usize>,
}

/// Update step: recomputes every centroid as the mean of its members.
///
/// Members are summed in dataset order whether or not `parallel` is set, so
/// both modes produce identical centroids. Empty clusters are resolved by
/// `policy`. Reseeding draws from `rng` in cluster index order, choosing among
/// the dataset vectors that coincide with no other centroid, so the reseeded
/// cluster owns at least that vector in the next assignment. When every vector
/// already sits on a centroid (fewer distinct vectors than clusters) the
/// cluster cannot be filled: its centroid is set to a random vector and it is
/// not reported as reseeded.
///
/// # Errors
///
/// [`Error::EmptyCluster`] for the first empty cluster under
/// [`EmptyClusterPolicy::Fail`].
pub fn update<T, R>(
    data: &Dataset<'_, T>,
    partition: &Partition,
    policy: EmptyClusterPolicy,
    iteration: usize,
    parallel: bool,
    rng: &mut R,
) -> Result<Update<T>>
where
    T: Float + Send + Sync,
    R: Rng + ?Sized,
{
    let cluster_mean = |members: &Vec<usize>| mean(members.iter().map(|&i| data.get(i)));
    let mut centroids: Vec<Option<Vec<T>>> = if parallel {
        partition.members().par_iter().map(cluster_mean).collect()
    } else {
        partition.members().iter().map(cluster_mean).collect()
    };

    let empty: Vec<usize> = (0..centroids.len())
        .filter(|&c| centroids[c].is_none())
        .collect();
    if let (Some(&cluster), EmptyClusterPolicy::Fail) = (empty.first(), policy) {
        return Err(Error::EmptyCluster { cluster, iteration });
    }

    let mut reseeded = Vec::new();
    for cluster in empty {
        let candidates: Vec<usize> = (0..data.len())
            .filter(|&i| {
                let p = data.get(i);
                !centroids.iter().flatten().any(|c| c.as_slice() == p)
            })
            .collect();
        let pick = if candidates.is_empty() {
            let pick = rng.gen_range(0..data.len());
            log::warn!(
                "cluster {} empty at iteration {} and every point already holds a centroid",
                cluster,
                iteration
            );
            pick
        } else {
            let pick = candidates[rng.gen_range(0..candidates.len())];
            log::warn!(
                "cluster {} empty at iteration {}, reseeding from point {}",
                cluster,
                iteration,
                pick
            );
            reseeded.push(cluster);
            pick
        };
        centroids[cluster] = Some(data.get(pick).to_vec());
    }

    Ok(Update {
        centroids: centroids.into_iter().flatten().collect(),
        reseeded,
    })
}

/// Largest Euclidean distance between positionally matching centroids.
pub fn max_movement<T: Float>(old: &[Vec<T>], new: &[Vec<T>]) -> T {
    old.iter()
        .zip(new)
        .map(|(o, n)| euclidean(o, n))
        .fold(T::zero(), T::max)
}

/// True when no centroid moved strictly more than `epsilon`.
///
/// Movement is the true (rooted) Euclidean distance.
pub fn has_converged<T: Float>(old: &[Vec<T>], new: &[Vec<T>], epsilon: T) -> bool {
    old.iter().zip(new).all(|(o, n)| euclidean(o, n) <= epsilon)
}
