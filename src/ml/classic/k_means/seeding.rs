use num_traits::Float;
use rand::Rng;

use super::dataset::Dataset;

/// Picks `k` initial centroids uniformly at random from the dataset, with
/// replacement. The same vector may seed more than one centroid.
pub fn random_with_replacement<T, R>(data: &Dataset<'_, T>, k: usize, rng: &mut R) -> Vec<Vec<T>>
where
    T: Float,
    R: Rng + ?Sized,
{
    (0..k)
        .map(|i| {
            let pick = rng.gen_range(0..data.len());
            log::trace!("centroid {} seeded from point {}", i, pick);
            data.get(pick).to_vec()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_seeds_are_dataset_points() {
        let data: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64, -(i as f64)]).collect();
        let ds = Dataset::new(&data).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let seeds = random_with_replacement(&ds, 5, &mut rng);
        assert_eq!(seeds.len(), 5);
        for s in &seeds {
            assert!(data.contains(s));
        }
    }

    #[test]
    fn test_same_seed_same_centroids() {
        let data: Vec<Vec<f64>> = (0..50).map(|i| vec![i as f64]).collect();
        let ds = Dataset::new(&data).unwrap();

        let a = random_with_replacement(&ds, 8, &mut ChaCha8Rng::seed_from_u64(42));
        let b = random_with_replacement(&ds, 8, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_more_seeds_than_points() {
        // Sampling with replacement never runs out of candidates.
        let data = vec![vec![1.0_f32, 1.0]];
        let ds = Dataset::new(&data).unwrap();
        let seeds = random_with_replacement(&ds, 3, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(seeds, vec![vec![1.0, 1.0]; 3]);
    }
}
