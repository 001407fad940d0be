//! Error types for series validation, alignment, and preprocessing.

use crate::constraint::WarpConstraint;

/// Errors from series construction and validation.
#[derive(Debug, thiserror::Error)]
pub enum SeriesError {
    /// Returned when an empty value buffer is provided as a series.
    #[error("series must be non-empty")]
    Empty,

    /// Returned when a point dimensionality of zero is requested.
    #[error("point dimensionality must be at least 1")]
    ZeroDimension,

    /// Returned when a series contains NaN, infinity, or negative infinity.
    #[error("series contains non-finite value at flat index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value in the flat buffer.
        index: usize,
    },

    /// Returned when the flat buffer does not divide evenly into points.
    #[error("buffer of length {len} does not divide into points of dimension {dim}")]
    TruncatedPoint {
        /// Length of the provided buffer.
        len: usize,
        /// Requested point dimensionality.
        dim: usize,
    },

    /// Returned when `from_rows` receives rows of differing lengths.
    #[error("row {row} has {got} components, expected {expected}")]
    RaggedRow {
        /// Zero-based index of the offending row.
        row: usize,
        /// Component count established by the first row.
        expected: usize,
        /// Component count of the offending row.
        got: usize,
    },
}

/// Errors from DTW alignment.
#[derive(Debug, thiserror::Error)]
pub enum DtwError {
    /// Returned when the two inputs have different point dimensionalities.
    /// Raised before any grid allocation.
    #[error("dimension mismatch: x has {x_dim}-dimensional points, y has {y_dim}")]
    DimensionMismatch {
        /// Dimensionality of the first series.
        x_dim: usize,
        /// Dimensionality of the second series.
        y_dim: usize,
    },

    /// Returned when a Sakoe-Chiba constraint is requested without a radius.
    #[error("Sakoe-Chiba constraint requires a radius")]
    MissingRadius,

    /// Returned when a negative Sakoe-Chiba radius is supplied.
    #[error("Sakoe-Chiba radius must be non-negative, got {radius}")]
    NegativeRadius {
        /// The rejected radius.
        radius: i64,
    },

    /// Returned when no warping path connects the start and end cells under
    /// the active constraint. Detected after the fill, when the terminal cell
    /// is still at +infinity.
    #[error("no admissible warping path for a {n} x {m} grid under {constraint}")]
    Infeasible {
        /// The constraint in effect.
        constraint: WarpConstraint,
        /// Number of points in the first series.
        n: usize,
        /// Number of points in the second series.
        m: usize,
    },
}

/// Errors from z-normalization.
#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    /// Returned when a component has zero variance and cannot be normalized.
    #[error("component {component} is constant ({value}) across all {n} points")]
    ConstantComponent {
        /// Zero-based component index.
        component: usize,
        /// The constant value.
        value: f64,
        /// Number of points in the series.
        n: usize,
    },
}
