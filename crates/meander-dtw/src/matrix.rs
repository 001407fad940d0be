//! Symmetric pairwise-distance matrix.

use std::ops::Index;

use crate::distance::DtwDistance;

/// Symmetric distance matrix over a collection of series, stored as a full
/// `n x n` row-major grid with a zero diagonal.
///
/// Access is symmetric by construction: `get(i, j) == get(j, i)`.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<DtwDistance>,
}

impl DistanceMatrix {
    /// Create a distance matrix from unique-pair distances, mirroring each
    /// entry across the diagonal. Pair indices must satisfy `i > j`.
    pub(crate) fn from_pairs(n: usize, pairs: &[(usize, usize, DtwDistance)]) -> Self {
        debug_assert_eq!(pairs.len(), n.saturating_sub(1) * n / 2);
        let mut data = vec![DtwDistance::new(0.0); n * n];
        for &(i, j, d) in pairs {
            data[i * n + j] = d;
            data[j * n + i] = d;
        }
        Self { n, data }
    }

    /// Return the number of series in the matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    /// Return true if the matrix covers no series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Return the distance between series `i` and series `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= n` or `j >= n`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> DtwDistance {
        assert!(
            i < self.n,
            "row index {i} out of bounds for matrix of size {}",
            self.n
        );
        assert!(
            j < self.n,
            "column index {j} out of bounds for matrix of size {}",
            self.n
        );
        self.data[i * self.n + j]
    }

    /// Iterate over all unique pairs `(i, j, distance)` where `i > j`.
    pub fn iter_pairs(&self) -> impl Iterator<Item = (usize, usize, DtwDistance)> + '_ {
        (1..self.n).flat_map(move |i| (0..i).map(move |j| (i, j, self.data[i * self.n + j])))
    }

    /// Return the matrix as raw rows of distance values.
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n)
            .map(|i| (0..self.n).map(|j| self.data[i * self.n + j].value()).collect())
            .collect()
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = DtwDistance;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        &self.data[i * self.n + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_matrix() -> DistanceMatrix {
        // 4 series: 4*(4-1)/2 = 6 unique pairs
        let pairs = vec![
            (1, 0, DtwDistance::new(1.0)),
            (2, 0, DtwDistance::new(2.0)),
            (2, 1, DtwDistance::new(3.0)),
            (3, 0, DtwDistance::new(4.0)),
            (3, 1, DtwDistance::new(5.0)),
            (3, 2, DtwDistance::new(6.0)),
        ];
        DistanceMatrix::from_pairs(4, &pairs)
    }

    #[test]
    fn diagonal_is_zero() {
        let m = make_matrix();
        for i in 0..4 {
            assert_eq!(m.get(i, i).value(), 0.0);
        }
    }

    #[test]
    fn symmetric_access() {
        let m = make_matrix();
        for i in 0..4 {
            for j in 0..4 {
                assert_eq!(m.get(i, j).value(), m.get(j, i).value());
            }
        }
    }

    #[test]
    fn specific_values() {
        let m = make_matrix();
        assert_eq!(m.get(1, 0).value(), 1.0);
        assert_eq!(m.get(2, 0).value(), 2.0);
        assert_eq!(m.get(2, 1).value(), 3.0);
        assert_eq!(m.get(3, 0).value(), 4.0);
        assert_eq!(m.get(3, 1).value(), 5.0);
        assert_eq!(m.get(3, 2).value(), 6.0);
    }

    #[test]
    fn index_trait_covers_diagonal() {
        let m = make_matrix();
        assert_eq!(m[(1, 0)].value(), 1.0);
        assert_eq!(m[(0, 1)].value(), 1.0);
        assert_eq!(m[(2, 2)].value(), 0.0);
    }

    #[test]
    fn iter_pairs_yields_lower_triangle() {
        let m = make_matrix();
        let pairs: Vec<_> = m.iter_pairs().collect();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], (1, 0, DtwDistance::new(1.0)));
        assert_eq!(pairs[5], (3, 2, DtwDistance::new(6.0)));
    }

    #[test]
    fn rows_are_full_width() {
        let m = make_matrix();
        let rows = m.to_rows();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], vec![0.0, 1.0, 2.0, 4.0]);
        assert_eq!(rows[3], vec![4.0, 5.0, 6.0, 0.0]);
    }

    #[test]
    fn len_and_is_empty() {
        let m = make_matrix();
        assert_eq!(m.len(), 4);
        assert!(!m.is_empty());
    }
}
