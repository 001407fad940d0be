//! Alignment distance newtype wrapper.

use std::cmp::Ordering;
use std::fmt;

/// A finite, non-negative accumulated alignment cost.
///
/// The value is the raw accumulated cost at the terminal cell in the chosen
/// metric; no square root is applied for either metric. Infeasible
/// alignments never produce a value, they surface as errors instead.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DtwDistance(f64);

impl DtwDistance {
    /// Create a new distance from a raw accumulated cost.
    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Return the raw distance value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Total ordering comparison using [`f64::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for DtwDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}
