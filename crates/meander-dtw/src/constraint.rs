//! Warping-window constraint policies.

use std::fmt;
use std::ops::Range;

use crate::error::DtwError;

/// Constraint on the admissible warping region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WarpConstraint {
    /// No constraint. Every cell of the cost grid is reachable.
    #[default]
    Unconstrained,

    /// Sakoe-Chiba band of half-width `k` index units around the scaled
    /// diagonal: cell (i,j) is reachable iff `|i*(m-1) - j*(n-1)| <= k*(n-1)`
    /// for an `n x m` grid. With `k = 0` only the diagonal itself survives.
    SakoeChiba(usize),

    /// Itakura parallelogram pinned at (0,0) and (n-1,m-1), with alignment
    /// slope bounded between 1/2 and 2 at both ends.
    Itakura,
}

impl WarpConstraint {
    /// Build a Sakoe-Chiba constraint from an optional signed radius, as
    /// accepted at the tool boundary.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::MissingRadius`] | `radius` is `None` |
    /// | [`DtwError::NegativeRadius`] | `radius` is negative |
    pub fn sakoe_chiba(radius: Option<i64>) -> Result<Self, DtwError> {
        match radius {
            None => Err(DtwError::MissingRadius),
            Some(r) if r < 0 => Err(DtwError::NegativeRadius { radius: r }),
            Some(r) => Ok(Self::SakoeChiba(
                usize::try_from(r).expect("radius is non-negative"),
            )),
        }
    }

    /// Report whether cell `(row, col)` of an `n_rows x n_cols` cost grid is
    /// inside the admissible region. Indices are assumed in bounds.
    ///
    /// Sakoe-Chiba applies `|row*(n_cols-1) - col*(n_rows-1)| <= k*(n_rows-1)`
    /// in exact integer arithmetic; a grid that degenerates to a single row or
    /// column is fully reachable. Itakura applies the four parallelogram
    /// edges directly.
    #[must_use]
    pub fn admits(&self, row: usize, col: usize, n_rows: usize, n_cols: usize) -> bool {
        match self {
            Self::Unconstrained => true,
            Self::SakoeChiba(k) => {
                if n_rows == 1 || n_cols == 1 {
                    return true;
                }
                let a = row * (n_cols - 1);
                let b = col * (n_rows - 1);
                a.abs_diff(b) <= k * (n_rows - 1)
            }
            Self::Itakura => {
                col <= 2 * row
                    && row <= 2 * col
                    && n_rows - 1 - row <= 2 * (n_cols - 1 - col)
                    && n_cols - 1 - col <= 2 * (n_rows - 1 - row)
            }
        }
    }

    /// Return the reachable column range for a given row of an
    /// `n_rows x n_cols` cost grid. The range may be empty.
    ///
    /// Admissible cells are contiguous within a row for every policy, so
    /// this is the interval form of [`admits`][Self::admits]; the fill
    /// routines iterate it instead of probing cells one by one.
    #[must_use]
    pub fn column_range(&self, row: usize, n_rows: usize, n_cols: usize) -> Range<usize> {
        match self {
            Self::Unconstrained => 0..n_cols,
            Self::SakoeChiba(k) => {
                if n_rows == 1 || n_cols == 1 {
                    return 0..n_cols;
                }
                let d = n_rows - 1;
                let a = row * (n_cols - 1);
                let reach = k * d;
                let lo = if a > reach {
                    (a - reach).div_ceil(d)
                } else {
                    0
                };
                let hi = ((a + reach) / d).min(n_cols - 1);
                if lo > hi { lo..lo } else { lo..hi + 1 }
            }
            Self::Itakura => {
                let rows_left = n_rows - 1 - row;
                let lo = row
                    .div_ceil(2)
                    .max((n_cols - 1).saturating_sub(2 * rows_left));
                let hi = match (n_cols - 1).checked_sub(rows_left.div_ceil(2)) {
                    Some(h) => (2 * row).min(h),
                    None => return 0..0,
                };
                if lo > hi { lo..lo } else { lo..hi + 1 }
            }
        }
    }
}

impl fmt::Display for WarpConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconstrained => write!(f, "unconstrained"),
            Self::SakoeChiba(k) => write!(f, "sakoe-chiba(k={k})"),
            Self::Itakura => write!(f, "itakura"),
        }
    }
}
