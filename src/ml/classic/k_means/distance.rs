use num_traits::Float;

/// Squared Euclidean distance between two points of the same dimension.
///
/// Only suitable for ranking: the square root is monotonic, so the nearest
/// centroid under this measure is the nearest under [`euclidean`].
pub fn squared_euclidean<T: Float>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b.iter()).fold(T::zero(), |acc, (&x, &y)| {
        let d = x - y;
        acc + d * d
    })
}

/// Euclidean distance `sqrt(Σ (a_i - b_i)^2)`.
pub fn euclidean<T: Float>(a: &[T], b: &[T]) -> T {
    squared_euclidean(a, b).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_three_four_five() {
        assert_relative_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
        assert_relative_eq!(squared_euclidean(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
    }

    #[test]
    fn test_identical_points() {
        let p = [1.5_f64, -2.0, 7.25];
        assert_eq!(euclidean(&p, &p), 0.0);
    }

    #[test]
    fn test_symmetric_f32() {
        let a = [1.0_f32, 2.0, 3.0];
        let b = [4.0_f32, 6.0, 3.0];
        assert_relative_eq!(euclidean(&a, &b), euclidean(&b, &a));
        assert_relative_eq!(euclidean(&a, &b), 5.0_f32);
    }
}
