//! Domain types for meander-io.

use meander_dtw::Series;

use crate::IoError;

/// A time series identifier.
///
/// Wraps a non-empty string parsed from the first column of a collection CSV.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesId(String);

impl SeriesId {
    /// Create a new series ID from a non-empty string.
    pub(crate) fn new(id: String) -> Self {
        debug_assert!(!id.is_empty(), "series ID must not be empty");
        Self(id)
    }

    /// Return the series ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SeriesId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated run name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunName(String);

impl RunName {
    /// Parse and validate a run name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidRunName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidRunName { name });
        }
        Ok(Self(name))
    }

    /// Return the run name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RunName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A collection of time series with associated identifiers.
///
/// Produced by [`CollectionReader`](crate::CollectionReader). IDs and
/// series are stored in parallel vectors — `ids[i]` corresponds to
/// `series[i]`.
#[derive(Debug)]
pub struct Collection {
    /// Series identifiers in insertion order (matching the CSV row order).
    pub ids: Vec<SeriesId>,
    /// Validated time series in the same order as `ids`.
    pub series: Vec<Series>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_id_as_str_returns_inner() {
        let id = SeriesId::new("GAUGE_01013500".to_string());
        assert_eq!(id.as_str(), "GAUGE_01013500");
    }

    #[test]
    fn run_name_valid() {
        let name = RunName::new("my-run_01".to_string());
        assert!(name.is_ok());
        assert_eq!(name.unwrap().as_str(), "my-run_01");
    }

    #[test]
    fn run_name_rejects_empty() {
        let name = RunName::new(String::new());
        assert!(matches!(name, Err(IoError::InvalidRunName { .. })));
    }

    #[test]
    fn run_name_rejects_special_chars() {
        let name = RunName::new("my run!".to_string());
        assert!(matches!(name, Err(IoError::InvalidRunName { .. })));
    }
}
