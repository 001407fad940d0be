//! Warping path types and cost-guided backtracking.

use crate::cost::CostMatrix;

/// A single step in a warping path, mapping index `x` in the first series
/// to index `y` in the second series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarpingStep {
    /// Index in the first series.
    pub x: usize,
    /// Index in the second series.
    pub y: usize,
}

/// An ordered sequence of warping steps in start-to-end order.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpingPath(Vec<WarpingStep>);

impl WarpingPath {
    /// Create a new warping path from a vector of steps.
    pub(crate) fn new(steps: Vec<WarpingStep>) -> Self {
        Self(steps)
    }

    /// Return the warping steps as a slice.
    #[must_use]
    pub fn steps(&self) -> &[WarpingStep] {
        &self.0
    }

    /// Return the number of steps in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path contains no steps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a WarpingPath {
    type Item = &'a WarpingStep;
    type IntoIter = std::slice::Iter<'a, WarpingStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Where a backtrack terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TraceOrigin {
    /// Stop only at cell (0, 0). Standard alignment.
    Corner,
    /// Stop at the first cell of row 0 reached. Subsequence matching.
    FirstRow,
}

/// Walk from `(end_row, end_col)` back to the trace origin by repeatedly
/// moving to the cheapest predecessor, comparing accumulated costs directly.
/// Ties prefer the diagonal predecessor, then the one above, then the one to
/// the left. Predecessors outside the grid read as infinite.
///
/// The caller must have established that `(end_row, end_col)` holds a finite
/// cost; every finite cell has a finite chain back to the origin.
pub(crate) fn backtrack(
    cost: &CostMatrix,
    end_row: usize,
    end_col: usize,
    origin: TraceOrigin,
) -> Vec<WarpingStep> {
    let mut steps = Vec::new();
    let mut i = end_row;
    let mut j = end_col;

    loop {
        steps.push(WarpingStep { x: i, y: j });
        let done = match origin {
            TraceOrigin::Corner => i == 0 && j == 0,
            TraceOrigin::FirstRow => i == 0,
        };
        if done {
            break;
        }

        let diag = if i > 0 && j > 0 {
            cost.get(i - 1, j - 1)
        } else {
            f64::INFINITY
        };
        let above = if i > 0 {
            cost.get(i - 1, j)
        } else {
            f64::INFINITY
        };
        let left = if j > 0 {
            cost.get(i, j - 1)
        } else {
            f64::INFINITY
        };

        if diag <= above && diag <= left {
            i -= 1;
            j -= 1;
        } else if above <= left {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    steps.reverse();
    steps
}
