//! Dynamic time warping alignment and subsequence matching.
//!
//! Pure math library — zero I/O. Provides DTW distance computation over
//! univariate or multivariate sequences under unconstrained, Sakoe-Chiba
//! band, or Itakura parallelogram warping constraints, warping path
//! extraction, subsequence matching against long references, pairwise
//! distance matrices, and z-normalization preprocessing.

mod constraint;
mod cost;
mod distance;
mod dtw;
mod error;
mod matrix;
mod metric;
mod path;
mod preprocess;
mod series;
mod subsequence;

pub use constraint::WarpConstraint;
pub use cost::CostMatrix;
pub use distance::DtwDistance;
pub use dtw::{Dtw, DtwAlignment};
pub use error::{DtwError, PreprocessError, SeriesError};
pub use matrix::DistanceMatrix;
pub use metric::PointMetric;
pub use path::{WarpingPath, WarpingStep};
pub use preprocess::{z_normalize, z_normalize_batch};
pub use series::{Series, SeriesView};
pub use subsequence::{SubsequenceMatch, subsequence_align};
