//! Subsequence matching: locate a short query inside a longer reference.

use tracing::instrument;

use crate::cost::CostMatrix;
use crate::distance::DtwDistance;
use crate::error::DtwError;
use crate::metric::PointMetric;
use crate::path::{self, TraceOrigin, WarpingPath};
use crate::series::SeriesView;

/// Result of locating a query inside a longer reference.
#[derive(Debug, Clone)]
pub struct SubsequenceMatch {
    distance: DtwDistance,
    cost: CostMatrix,
    path: WarpingPath,
}

impl SubsequenceMatch {
    /// Return the accumulated cost of the matched region.
    #[must_use]
    pub fn distance(&self) -> DtwDistance {
        self.distance
    }

    /// Return the accumulated-cost grid.
    #[must_use]
    pub fn cost(&self) -> &CostMatrix {
        &self.cost
    }

    /// Return the warping path in start-to-end order.
    #[must_use]
    pub fn path(&self) -> &WarpingPath {
        &self.path
    }

    /// Return the first reference index covered by the match.
    #[must_use]
    pub fn start(&self) -> usize {
        self.path.steps().first().expect("path is non-empty").y
    }

    /// Return the last reference index covered by the match.
    #[must_use]
    pub fn end(&self) -> usize {
        self.path.steps().last().expect("path is non-empty").y
    }
}

/// Align `query` against the best-matching contiguous region of `reference`.
///
/// The fill is the standard recurrence with a free first row: the match may
/// begin at any reference position at zero prior cost. The end column is the
/// cheapest cell of the last row, taking the smallest index on ties, and the
/// backtrack stops on reaching the first row rather than at column zero.
/// Always uses the Manhattan local metric with no warping constraint.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`DtwError::DimensionMismatch`] | `query` and `reference` have different point dimensionality |
#[instrument(skip(query, reference), fields(n = query.len(), m = reference.len()))]
pub fn subsequence_align(
    query: SeriesView<'_>,
    reference: SeriesView<'_>,
) -> Result<SubsequenceMatch, DtwError> {
    if query.dim() != reference.dim() {
        return Err(DtwError::DimensionMismatch {
            x_dim: query.dim(),
            y_dim: reference.dim(),
        });
    }

    let n = query.len();
    let m = reference.len();
    let metric = PointMetric::Manhattan;

    let mut cost = CostMatrix::filled_infinite(n, m);
    for j in 0..m {
        cost.set(0, j, metric.eval(query.point(0), reference.point(j)));
    }
    for i in 1..n {
        for j in 0..m {
            let local = metric.eval(query.point(i), reference.point(j));
            let diag = if j > 0 {
                cost.get(i - 1, j - 1)
            } else {
                f64::INFINITY
            };
            let above = cost.get(i - 1, j);
            let left = if j > 0 { cost.get(i, j - 1) } else { f64::INFINITY };
            cost.set(i, j, local + diag.min(above).min(left));
        }
    }

    // Strict-less scan keeps the smallest end column on ties.
    let last = cost.row(n - 1);
    let mut end_col = 0;
    for (j, &v) in last.iter().enumerate() {
        if v < last[end_col] {
            end_col = j;
        }
    }
    let distance = DtwDistance::new(last[end_col]);

    let steps = path::backtrack(&cost, n - 1, end_col, TraceOrigin::FirstRow);
    Ok(SubsequenceMatch {
        distance,
        cost,
        path: WarpingPath::new(steps),
    })
}
