//! JSON result writer for alignment, matching, and pairwise outputs.

use std::fs;
use std::path::{Path, PathBuf};

use meander_dtw::{DistanceMatrix, Dtw, DtwAlignment, SubsequenceMatch, WarpingPath};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::domain::{RunName, SeriesId};
use crate::IoError;

/// Writes alignment, matching, and pairwise results to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{run}_align.json`, `{run}_match.json`, and
/// `{run}_pairwise.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
    run: RunName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and run name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), run = %run))]
    pub fn new(output_dir: &Path, run: RunName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            run,
        })
    }

    /// Write an alignment result to `{run}_align.json`.
    ///
    /// The full cost matrix is included only when `include_matrix` is set.
    /// Cells left untouched by the constraint window hold +Inf, which
    /// serde_json serializes as JSON null.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_alignment(
        &self,
        dtw: &Dtw,
        alignment: &DtwAlignment,
        include_matrix: bool,
    ) -> Result<(), IoError> {
        let path = self
            .output_dir
            .join(format!("{}_align.json", self.run.as_str()));

        let cost = alignment.cost();
        let cost_matrix: Option<Vec<Vec<f64>>> =
            include_matrix.then(|| (0..cost.n_rows()).map(|i| cost.row(i).to_vec()).collect());

        let artifact = AlignArtifact {
            run: self.run.as_str(),
            constraint: dtw.constraint().to_string(),
            metric: dtw.metric().to_string(),
            n: cost.n_rows(),
            m: cost.n_cols(),
            distance: alignment.distance().value(),
            path_len: alignment.path().len(),
            path: path_pairs(alignment.path()),
            cost_matrix,
        };

        let json = serde_json::to_string_pretty(&artifact).expect("serialization cannot fail");
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), "alignment result written");
        Ok(())
    }

    /// Write a subsequence match result to `{run}_match.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_match(&self, result: &SubsequenceMatch) -> Result<(), IoError> {
        let path = self
            .output_dir
            .join(format!("{}_match.json", self.run.as_str()));

        let artifact = MatchArtifact {
            run: self.run.as_str(),
            n: result.cost().n_rows(),
            m: result.cost().n_cols(),
            distance: result.distance().value(),
            start: result.start(),
            end: result.end(),
            path_len: result.path().len(),
            path: path_pairs(result.path()),
        };

        let json = serde_json::to_string_pretty(&artifact).expect("serialization cannot fail");
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), "match result written");
        Ok(())
    }

    /// Write a pairwise distance matrix to `{run}_pairwise.json`.
    ///
    /// `ids[i]` labels row and column `i` of the matrix.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::WriteFile`] if the file cannot be written.
    #[instrument(skip_all)]
    pub fn write_pairwise(
        &self,
        dtw: &Dtw,
        ids: &[SeriesId],
        distances: &DistanceMatrix,
    ) -> Result<(), IoError> {
        let path = self
            .output_dir
            .join(format!("{}_pairwise.json", self.run.as_str()));

        let artifact = PairwiseArtifact {
            run: self.run.as_str(),
            constraint: dtw.constraint().to_string(),
            metric: dtw.metric().to_string(),
            n_series: distances.len(),
            ids: ids.iter().map(SeriesId::as_str).collect(),
            distances: distances.to_rows(),
        };

        let json = serde_json::to_string_pretty(&artifact).expect("serialization cannot fail");
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;

        info!(path = %path.display(), "pairwise result written");
        Ok(())
    }
}

fn path_pairs(path: &WarpingPath) -> Vec<[usize; 2]> {
    path.steps().iter().map(|s| [s.x, s.y]).collect()
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct AlignArtifact<'a> {
    run: &'a str,
    constraint: String,
    metric: String,
    n: usize,
    m: usize,
    distance: f64,
    path_len: usize,
    path: Vec<[usize; 2]>,
    cost_matrix: Option<Vec<Vec<f64>>>,
}

#[derive(Serialize)]
struct MatchArtifact<'a> {
    run: &'a str,
    n: usize,
    m: usize,
    distance: f64,
    start: usize,
    end: usize,
    path_len: usize,
    path: Vec<[usize; 2]>,
}

#[derive(Serialize)]
struct PairwiseArtifact<'a> {
    run: &'a str,
    constraint: String,
    metric: String,
    n_series: usize,
    ids: Vec<&'a str>,
    distances: Vec<Vec<f64>>,
}
