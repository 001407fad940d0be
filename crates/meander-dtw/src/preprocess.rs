//! Series preprocessing: per-component z-normalization.

use crate::error::PreprocessError;
use crate::series::Series;

/// Z-normalize a series to zero mean and unit variance.
///
/// Uses population standard deviation (divides by n, not n-1). Multivariate
/// series are normalized component-wise, each component independently.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`PreprocessError::ConstantComponent`] | A component is identical across all points (zero variance) |
pub fn z_normalize(series: &Series) -> Result<Series, PreprocessError> {
    let n = series.len();
    let dim = series.dim();
    let scale = n as f64;

    let mut normalized = series.as_ref().to_vec();
    for component in 0..dim {
        let mean = (0..n).map(|i| series.point(i)[component]).sum::<f64>() / scale;
        let variance = (0..n)
            .map(|i| (series.point(i)[component] - mean).powi(2))
            .sum::<f64>()
            / scale;
        let std = variance.sqrt();

        if std == 0.0 {
            return Err(PreprocessError::ConstantComponent {
                component,
                value: series.point(0)[component],
                n,
            });
        }

        for i in 0..n {
            normalized[i * dim + component] = (series.point(i)[component] - mean) / std;
        }
    }

    // z-normalized values are always finite when input is finite and std > 0
    Ok(Series::multivariate(normalized, dim).expect("z-normalized values should be finite"))
}

/// Z-normalize a batch of series.
///
/// Each series is independently normalized.
///
/// # Errors
///
/// Returns the first [`PreprocessError`] encountered.
pub fn z_normalize_batch(series: &[Series]) -> Result<Vec<Series>, PreprocessError> {
    series.iter().map(z_normalize).collect()
}
