use num_traits::Float;

use crate::error::{Error, Result};

/// A validated, borrowed view over the input vectors of a run.
///
/// Construction guarantees that the dataset is non-empty, that every vector has
/// the same non-zero dimension and that all coordinates are finite. The engine
/// never mutates the underlying vectors.
#[derive(Debug, Clone, Copy)]
pub struct Dataset<'a, T> {
    points: &'a [Vec<T>],
    dim: usize,
}

impl<'a, T: Float> Dataset<'a, T> {
    /// Validates `points` and wraps them.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyDataset`] if `points` is empty.
    /// - [`Error::ZeroDimension`] if the vectors have no coordinates.
    /// - [`Error::DimensionMismatch`] for the first vector whose length differs
    ///   from the first vector's.
    /// - [`Error::NonFiniteValue`] for the first vector containing NaN or infinity.
    pub fn new(points: &'a [Vec<T>]) -> Result<Self> {
        let first = points.first().ok_or(Error::EmptyDataset)?;
        let dim = first.len();
        if dim == 0 {
            return Err(Error::ZeroDimension);
        }
        check_vectors(points, dim)?;
        Ok(Self { points, dim })
    }

    /// Number of vectors.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a validated dataset.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shared dimension of every vector.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn get(&self, index: usize) -> &'a [T] {
        &self.points[index]
    }

    pub fn points(&self) -> &'a [Vec<T>] {
        self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [T]> + 'a {
        self.points.iter().map(Vec::as_slice)
    }
}

/// Checks that every vector has dimension `dim` and only finite coordinates.
pub(crate) fn check_vectors<T: Float>(vectors: &[Vec<T>], dim: usize) -> Result<()> {
    for (index, v) in vectors.iter().enumerate() {
        if v.len() != dim {
            return Err(Error::DimensionMismatch {
                index,
                expected: dim,
                found: v.len(),
            });
        }
        if v.iter().any(|x| !x.is_finite()) {
            return Err(Error::NonFiniteValue { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dataset() {
        let data = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let ds = Dataset::new(&data).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.dim(), 2);
        assert!(!ds.is_empty());
        assert_eq!(ds.get(1), &[3.0, 4.0]);
        assert_eq!(ds.iter().count(), 3);
    }

    #[test]
    fn test_empty_dataset() {
        let data: Vec<Vec<f64>> = vec![];
        assert_eq!(Dataset::new(&data).unwrap_err(), Error::EmptyDataset);
    }

    #[test]
    fn test_zero_dimension() {
        let data: Vec<Vec<f64>> = vec![vec![], vec![]];
        assert_eq!(Dataset::new(&data).unwrap_err(), Error::ZeroDimension);
    }

    #[test]
    fn test_dimension_mismatch() {
        let data = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0]];
        assert_eq!(
            Dataset::new(&data).unwrap_err(),
            Error::DimensionMismatch {
                index: 2,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_non_finite() {
        let data = vec![vec![1.0, 2.0], vec![f64::NAN, 4.0]];
        assert_eq!(
            Dataset::new(&data).unwrap_err(),
            Error::NonFiniteValue { index: 1 }
        );

        let data = vec![vec![f32::INFINITY]];
        assert_eq!(
            Dataset::new(&data).unwrap_err(),
            Error::NonFiniteValue { index: 0 }
        );
    }
}
