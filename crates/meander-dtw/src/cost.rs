//! Dense accumulated-cost grid.

use std::ops::Index;

/// Row-major accumulated-cost grid of a single alignment.
///
/// Cells outside the active constraint region, and reachable cells whose
/// every predecessor is unreachable, hold `f64::INFINITY`. Once the fill
/// completes the grid is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    values: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
}

impl CostMatrix {
    /// Allocate a grid with every cell set to `f64::INFINITY`.
    pub(crate) fn filled_infinite(n_rows: usize, n_cols: usize) -> Self {
        Self {
            values: vec![f64::INFINITY; n_rows * n_cols],
            n_rows,
            n_cols,
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        self.values[row * self.n_cols + col] = value;
    }

    /// Return the accumulated cost at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= n_rows` or `col >= n_cols`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(
            row < self.n_rows,
            "row index {row} out of bounds for {} rows",
            self.n_rows
        );
        assert!(
            col < self.n_cols,
            "column index {col} out of bounds for {} columns",
            self.n_cols
        );
        self.values[row * self.n_cols + col]
    }

    /// Return one full row of the grid.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.n_cols..(row + 1) * self.n_cols]
    }

    /// Return the cost at the terminal cell `(n_rows-1, n_cols-1)`.
    #[must_use]
    pub fn terminal(&self) -> f64 {
        self.get(self.n_rows - 1, self.n_cols - 1)
    }

    /// Return the number of rows (length of the first series).
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Return the number of columns (length of the second series).
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.values[row * self.n_cols + col]
    }
}
