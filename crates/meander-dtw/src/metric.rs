//! Pointwise local distance between aligned points.

use std::fmt;

/// Local distance between two d-dimensional points.
///
/// Both variants are deterministic and symmetric, and evaluate to zero for
/// identical points. The choice propagates into the accumulated cost; no
/// final square root is applied to either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointMetric {
    /// Summed component-wise absolute difference. Equals the plain Euclidean
    /// distance for univariate points.
    #[default]
    Manhattan,
    /// Summed component-wise squared difference.
    SquaredEuclidean,
}

impl PointMetric {
    /// Evaluate the metric on two points of equal dimensionality.
    #[must_use]
    pub fn eval(self, a: &[f64], b: &[f64]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        match self {
            Self::Manhattan => a.iter().zip(b).map(|(p, q)| (p - q).abs()).sum(),
            Self::SquaredEuclidean => a.iter().zip(b).map(|(p, q)| (p - q) * (p - q)).sum(),
        }
    }
}

impl fmt::Display for PointMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manhattan => write!(f, "manhattan"),
            Self::SquaredEuclidean => write!(f, "squared_euclidean"),
        }
    }
}
