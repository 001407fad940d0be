//! Point-sequence types with validation guarantees.

use std::ops::Index;

use crate::error::SeriesError;

/// Owned, validated point sequence stored row-major by point. Guaranteed
/// non-empty with all finite values and a positive point dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    values: Vec<f64>,
    dim: usize,
}

impl Series {
    /// Create a univariate series of scalar points.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SeriesError::Empty`] | `values` is empty |
    /// | [`SeriesError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn univariate(values: Vec<f64>) -> Result<Self, SeriesError> {
        Self::multivariate(values, 1)
    }

    /// Create a series of `dim`-dimensional points from a flat row-major buffer.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SeriesError::ZeroDimension`] | `dim` is zero |
    /// | [`SeriesError::Empty`] | `values` is empty |
    /// | [`SeriesError::TruncatedPoint`] | `values.len()` is not a multiple of `dim` |
    /// | [`SeriesError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn multivariate(values: Vec<f64>, dim: usize) -> Result<Self, SeriesError> {
        if dim == 0 {
            return Err(SeriesError::ZeroDimension);
        }
        if values.is_empty() {
            return Err(SeriesError::Empty);
        }
        if values.len() % dim != 0 {
            return Err(SeriesError::TruncatedPoint {
                len: values.len(),
                dim,
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SeriesError::NonFiniteValue { index });
        }
        Ok(Self { values, dim })
    }

    /// Create a series from one row per point, inferring the dimensionality
    /// from the first row.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SeriesError::Empty`] | `rows` is empty |
    /// | [`SeriesError::ZeroDimension`] | The first row is empty |
    /// | [`SeriesError::RaggedRow`] | A later row has a different length |
    /// | [`SeriesError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, SeriesError> {
        let Some(first) = rows.first() else {
            return Err(SeriesError::Empty);
        };
        let dim = first.len();
        if dim == 0 {
            return Err(SeriesError::ZeroDimension);
        }
        let mut values = Vec::with_capacity(rows.len() * dim);
        for (row, point) in rows.iter().enumerate() {
            if point.len() != dim {
                return Err(SeriesError::RaggedRow {
                    row,
                    expected: dim,
                    got: point.len(),
                });
            }
            values.extend_from_slice(point);
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SeriesError::NonFiniteValue { index });
        }
        Ok(Self { values, dim })
    }

    /// Borrow this series as a zero-copy view.
    #[must_use]
    pub fn as_view(&self) -> SeriesView<'_> {
        SeriesView::new_unchecked(&self.values, self.dim)
    }

    /// Return the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() / self.dim
    }

    /// Return true if the series has no points.
    ///
    /// A [`Series`] constructed via its validating constructors is always
    /// non-empty, so this always returns `false` for valid instances.
    /// Provided to satisfy the `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return the point dimensionality.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Return the components of the point at `index`.
    #[must_use]
    pub fn point(&self, index: usize) -> &[f64] {
        &self.values[index * self.dim..(index + 1) * self.dim]
    }

    /// Consume and return the inner flat buffer.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }
}

impl AsRef<[f64]> for Series {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for Series {
    type Error = SeriesError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::univariate(values)
    }
}

/// Borrowed, validated view into a point sequence. Zero-copy reference.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a> {
    values: &'a [f64],
    dim: usize,
}

impl<'a> SeriesView<'a> {
    /// Create a view over a flat row-major buffer of `dim`-dimensional points.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SeriesError::ZeroDimension`] | `dim` is zero |
    /// | [`SeriesError::Empty`] | `values` is empty |
    /// | [`SeriesError::TruncatedPoint`] | `values.len()` is not a multiple of `dim` |
    /// | [`SeriesError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn new(values: &'a [f64], dim: usize) -> Result<Self, SeriesError> {
        if dim == 0 {
            return Err(SeriesError::ZeroDimension);
        }
        if values.is_empty() {
            return Err(SeriesError::Empty);
        }
        if values.len() % dim != 0 {
            return Err(SeriesError::TruncatedPoint {
                len: values.len(),
                dim,
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(SeriesError::NonFiniteValue { index });
        }
        Ok(Self { values, dim })
    }

    /// Create a univariate view over a slice of scalar points.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`SeriesError::Empty`] | `values` is empty |
    /// | [`SeriesError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn univariate(values: &'a [f64]) -> Result<Self, SeriesError> {
        Self::new(values, 1)
    }

    /// Create a view without validation. For internal use where data is
    /// already validated.
    pub(crate) fn new_unchecked(values: &'a [f64], dim: usize) -> Self {
        Self { values, dim }
    }

    /// Return the underlying flat buffer.
    #[must_use]
    pub fn as_slice(&self) -> &'a [f64] {
        self.values
    }

    /// Return the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() / self.dim
    }

    /// Return true if the view has no points.
    ///
    /// A [`SeriesView`] constructed via [`SeriesView::new`] is always
    /// non-empty, so this always returns `false` for valid instances.
    /// Provided to satisfy the `len_without_is_empty` convention.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return the point dimensionality.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Return the components of the point at `index`.
    #[must_use]
    pub fn point(&self, index: usize) -> &'a [f64] {
        &self.values[index * self.dim..(index + 1) * self.dim]
    }
}

impl Index<usize> for SeriesView<'_> {
    type Output = [f64];

    fn index(&self, index: usize) -> &Self::Output {
        self.point(index)
    }
}

impl AsRef<[f64]> for SeriesView<'_> {
    fn as_ref(&self) -> &[f64] {
        self.values
    }
}
