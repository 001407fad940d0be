//! DTW alignment over validated point sequences.

use rayon::prelude::*;
use tracing::instrument;

use crate::constraint::WarpConstraint;
use crate::cost::CostMatrix;
use crate::distance::DtwDistance;
use crate::error::DtwError;
use crate::matrix::DistanceMatrix;
use crate::metric::PointMetric;
use crate::path::{self, TraceOrigin, WarpingPath};
use crate::series::{Series, SeriesView};

/// Immutable DTW configuration. Thread-safe and copyable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dtw {
    constraint: WarpConstraint,
    metric: PointMetric,
}

/// Full alignment artifact: distance, accumulated-cost grid, and warping path.
#[derive(Debug, Clone)]
pub struct DtwAlignment {
    distance: DtwDistance,
    cost: CostMatrix,
    path: WarpingPath,
}

impl DtwAlignment {
    /// Return the alignment distance.
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
}

impl Dtw {
    /// Create an unconstrained calculator with the Manhattan local metric.
    #[must_use]
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Create a calculator with a Sakoe-Chiba band of half-width `radius`.
    #[must_use]
    pub fn with_sakoe_chiba(radius: usize) -> Self {
        Self::with_constraint(WarpConstraint::SakoeChiba(radius))
    }

    /// Create a calculator with the Itakura parallelogram constraint.
    #[must_use]
    pub fn with_itakura() -> Self {
        Self::with_constraint(WarpConstraint::Itakura)
    }

    /// Create a calculator from an existing [`WarpConstraint`].
    #[must_use]
    pub fn with_constraint(constraint: WarpConstraint) -> Self {
        Self {
            constraint,
            metric: PointMetric::default(),
        }
    }

    /// Replace the local metric, keeping the constraint.
    #[must_use]
    pub fn with_metric(mut self, metric: PointMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Return the warping constraint configuration.
    #[must_use]
    pub fn constraint(&self) -> WarpConstraint {
        self.constraint
    }

    /// Return the local metric configuration.
    #[must_use]
    pub fn metric(&self) -> PointMetric {
        self.metric
    }

    /// Compute the alignment distance between two sequences.
    ///
    /// Uses a memory-efficient rolling two-row buffer rather than allocating
    /// the full cost grid. Only cells inside each row's admissible range are
    /// computed, so a narrow band does proportionally less work. The reported
    /// value is the raw accumulated terminal cost in the configured metric.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::DimensionMismatch`] | `x` and `y` have different point dimensionality |
    /// | [`DtwError::Infeasible`] | No admissible warping path connects the corners |
    #[instrument(skip(x, y), fields(n = x.len(), m = y.len()))]
    pub fn distance(&self, x: SeriesView<'_>, y: SeriesView<'_>) -> Result<DtwDistance, DtwError> {
        self.check_dims(x, y)?;
        let terminal = self.fill_rolling(x, y);
        self.finish(terminal, x.len(), y.len())
    }

    /// Compute the alignment distance, full cost grid, and warping path.
    ///
    /// Allocates the dense grid so the optimal path can be reconstructed by
    /// walking accumulated costs backwards from the terminal cell. Use
    /// [`distance`][Dtw::distance] when only the scalar is needed.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::DimensionMismatch`] | `x` and `y` have different point dimensionality |
    /// | [`DtwError::Infeasible`] | No admissible warping path connects the corners |
    #[instrument(skip(x, y), fields(n = x.len(), m = y.len()))]
    pub fn align(&self, x: SeriesView<'_>, y: SeriesView<'_>) -> Result<DtwAlignment, DtwError> {
        self.check_dims(x, y)?;
        let cost = self.fill_full(x, y);
        let distance = self.finish(cost.terminal(), x.len(), y.len())?;
        let steps = path::backtrack(&cost, x.len() - 1, y.len() - 1, TraceOrigin::Corner);
        Ok(DtwAlignment {
            distance,
            cost,
            path: WarpingPath::new(steps),
        })
    }

    /// Compute pairwise alignment distances for a collection of series.
    ///
    /// Returns a symmetric [`DistanceMatrix`] covering all unique pairs,
    /// computed in parallel with rayon.
    ///
    /// # Errors
    ///
    /// Returns the first [`DtwError`] produced by any pair.
    #[instrument(skip(self, series), fields(n = series.len()))]
    pub fn pairwise(&self, series: &[Series]) -> Result<DistanceMatrix, DtwError> {
        let n = series.len();
        let total_pairs = n.saturating_sub(1) * n / 2;

        let views: Vec<SeriesView<'_>> = series.iter().map(|s| s.as_view()).collect();

        // Flat lower-triangle index: flat = i*(i-1)/2 + j with i > j,
        // inverted via i = floor((1 + sqrt(1 + 8*flat)) / 2).
        let pairs = (0..total_pairs)
            .into_par_iter()
            .map(|flat_idx| {
                let i = ((1.0 + (1.0 + 8.0 * flat_idx as f64).sqrt()) / 2.0).floor() as usize;
                let j = flat_idx - i * (i - 1) / 2;
                let d = self.distance(views[i], views[j])?;
                Ok((i, j, d))
            })
            .collect::<Result<Vec<_>, DtwError>>()?;

        Ok(DistanceMatrix::from_pairs(n, &pairs))
    }

    fn check_dims(&self, x: SeriesView<'_>, y: SeriesView<'_>) -> Result<(), DtwError> {
        if x.dim() != y.dim() {
            return Err(DtwError::DimensionMismatch {
                x_dim: x.dim(),
                y_dim: y.dim(),
            });
        }
        Ok(())
    }

    fn finish(&self, terminal: f64, n: usize, m: usize) -> Result<DtwDistance, DtwError> {
        if terminal.is_finite() {
            Ok(DtwDistance::new(terminal))
        } else {
            Err(DtwError::Infeasible {
                constraint: self.constraint,
                n,
                m,
            })
        }
    }

    /// Rolling two-row fill. Returns the terminal accumulated cost, which is
    /// infinite when the constraint leaves the corners disconnected.
    fn fill_rolling(&self, x: SeriesView<'_>, y: SeriesView<'_>) -> f64 {
        let n = x.len();
        let m = y.len();

        let mut prev = vec![f64::INFINITY; m];
        let mut curr = vec![f64::INFINITY; m];

        for i in 0..n {
            curr.fill(f64::INFINITY);
            for j in self.constraint.column_range(i, n, m) {
                let local = self.metric.eval(x.point(i), y.point(j));
                let best = if i == 0 && j == 0 {
                    0.0
                } else {
                    let diag = if i > 0 && j > 0 {
                        prev[j - 1]
                    } else {
                        f64::INFINITY
                    };
                    let above = if i > 0 { prev[j] } else { f64::INFINITY };
                    let left = if j > 0 { curr[j - 1] } else { f64::INFINITY };
                    diag.min(above).min(left)
                };
                curr[j] = local + best;
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        // After the final swap, `prev` holds the last completed row.
        prev[m - 1]
    }

    /// Dense fill over the full grid. Unreachable cells keep their infinite
    /// initial value, so infeasibility shows up at the terminal cell.
    fn fill_full(&self, x: SeriesView<'_>, y: SeriesView<'_>) -> CostMatrix {
        let n = x.len();
        let m = y.len();
        let mut cost = CostMatrix::filled_infinite(n, m);

        for i in 0..n {
            for j in self.constraint.column_range(i, n, m) {
                let local = self.metric.eval(x.point(i), y.point(j));
                let best = if i == 0 && j == 0 {
                    0.0
                } else {
                    let diag = if i > 0 && j > 0 {
                        cost.get(i - 1, j - 1)
                    } else {
                        f64::INFINITY
                    };
                    let above = if i > 0 { cost.get(i - 1, j) } else { f64::INFINITY };
                    let left = if j > 0 { cost.get(i, j - 1) } else { f64::INFINITY };
                    diag.min(above).min(left)
                };
                cost.set(i, j, local + best);
            }
        }

        cost
    }
}
