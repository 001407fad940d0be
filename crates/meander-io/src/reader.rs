//! CSV time series readers with full input validation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use meander_dtw::Series;
use tracing::{debug, info, instrument};

use crate::domain::{Collection, SeriesId};
use crate::IoError;

/// Reads a single (possibly multivariate) time series from a CSV file.
///
/// Expected CSV format:
/// - Header row required, naming the point components (e.g. `value` or `u,v`)
/// - One data row per time step, one float per component
/// - All rows must have the same number of columns as the header
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::NonFiniteValue`] | Cell is NaN, Inf, or unparseable float |
pub struct SeriesReader {
    path: PathBuf,
}

impl SeriesReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`Series`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Series, IoError> {
        // 1. Open file (FileNotFound on failure)
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // 2. Build CSV reader with headers.
        // flexible(true) allows rows with varying column counts so that our own
        // InconsistentRowLength check fires instead of a low-level CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        // 3. Read header to determine the point dimensionality
        let header = rdr.headers().map_err(|e| IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        })?;
        let expected_cols = header.len();
        debug!(n_components = expected_cols, "read CSV header");

        // 4. Iterate rows with validation, one row per time step
        let mut rows: Vec<Vec<f64>> = Vec::new();

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| IoError::CsvParse {
                path: self.path.clone(),
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;

            // Check column count consistency
            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            // Parse component values
            let mut point = Vec::with_capacity(expected_cols);
            for col_index in 0..record.len() {
                let raw = record.get(col_index).unwrap_or("");
                let value: f64 = raw.parse().map_err(|_| IoError::NonFiniteValue {
                    path: self.path.clone(),
                    row_index,
                    col_index,
                    raw: raw.to_string(),
                })?;
                if !value.is_finite() {
                    return Err(IoError::NonFiniteValue {
                        path: self.path.clone(),
                        row_index,
                        col_index,
                        raw: raw.to_string(),
                    });
                }
                point.push(value);
            }
            rows.push(point);
        }

        // 5. Check for empty dataset
        if rows.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        // Build Series (this also validates non-empty, rectangular, and finite)
        // We already validated, so this should not fail, but handle gracefully
        let series = Series::from_rows(&rows).map_err(|_| IoError::EmptyDataset {
            path: self.path.clone(),
        })?;

        info!(
            n_steps = series.len(),
            dim = series.dim(),
            "series loaded"
        );

        Ok(series)
    }
}

/// Reads a collection of univariate time series from a CSV file.
///
/// Expected CSV format:
/// - Header row required (first column is series_id, remaining are positional time steps)
/// - `series_id,t0,t1,...,tn`
/// - One row per series, all rows must have the same number of columns
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::NonFiniteValue`] | Cell is NaN, Inf, or unparseable float |
/// | [`IoError::DuplicateSeriesId`] | Same series_id appears twice |
pub struct CollectionReader {
    path: PathBuf,
}

impl CollectionReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`Collection`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Collection, IoError> {
        // 1. Open file (FileNotFound on failure)
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // 2. Build CSV reader with headers.
        // flexible(true) allows rows with varying column counts so that our own
        // InconsistentRowLength check fires instead of a low-level CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        // 3. Read header to determine expected column count
        let header = rdr.headers().map_err(|e| IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        })?;
        let expected_cols = header.len();
        debug!(expected_cols, "read CSV header");

        // 4. Iterate rows with validation
        let mut ids = Vec::new();
        let mut series = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| IoError::CsvParse {
                path: self.path.clone(),
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;

            // Check column count consistency
            if record.len() != expected_cols {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    row_index,
                    expected: expected_cols,
                    got: record.len(),
                });
            }

            // Extract series_id (first column)
            let id_str = record.get(0).unwrap_or("").to_string();

            // Check for duplicate series IDs
            if let Some(&first_row) = seen.get(&id_str) {
                return Err(IoError::DuplicateSeriesId {
                    path: self.path.clone(),
                    series_id: id_str,
                    first_row,
                    second_row: row_index,
                });
            }
            seen.insert(id_str.clone(), row_index);

            // Parse time step values (columns 1..n)
            let mut values = Vec::with_capacity(expected_cols - 1);
            for col_index in 1..record.len() {
                let raw = record.get(col_index).unwrap_or("");
                let value: f64 = raw.parse().map_err(|_| IoError::NonFiniteValue {
                    path: self.path.clone(),
                    row_index,
                    col_index: col_index - 1,
                    raw: raw.to_string(),
                })?;
                if !value.is_finite() {
                    return Err(IoError::NonFiniteValue {
                        path: self.path.clone(),
                        row_index,
                        col_index: col_index - 1,
                        raw: raw.to_string(),
                    });
                }
                values.push(value);
            }

            // Build Series (this also validates non-empty and finite)
            // We already validated, so this should not fail, but handle gracefully
            let s = Series::univariate(values).map_err(|_| IoError::EmptyDataset {
                path: self.path.clone(),
            })?;

            ids.push(SeriesId::new(id_str));
            series.push(s);
        }

        // 5. Check for empty dataset
        if ids.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        info!(
            n_series = ids.len(),
            n_timesteps = series.first().map_or(0, |s| s.len()),
            "collection loaded"
        );

        Ok(Collection { ids, series })
    }
}
