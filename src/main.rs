use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::info;

use meander_dtw::{
    Dtw, PointMetric, Series, WarpConstraint, subsequence_align, z_normalize, z_normalize_batch,
};
use meander_io::{CollectionReader, ResultWriter, RunName, SeriesReader};

#[derive(Parser)]
#[command(name = "meander")]
#[command(about = "Time series alignment and matching with dynamic time warping")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for parallel computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Global path constraint applied to the warping grid.
#[derive(ValueEnum, Debug, Clone, Copy)]
enum ConstraintKind {
    /// Full N x M grid is admissible
    None,
    /// Band of half-width --radius around the scaled diagonal
    SakoeChiba,
    /// Parallelogram with slope bounds 1/2 and 2
    Itakura,
}

/// Shared warping parameters for alignment commands.
#[derive(Args, Debug, Clone)]
struct WarpingArgs {
    /// Global path constraint
    #[arg(long, value_enum, default_value_t = ConstraintKind::None)]
    constraint: ConstraintKind,

    /// Sakoe-Chiba band radius (required with --constraint sakoe-chiba)
    #[arg(long, allow_negative_numbers = true)]
    radius: Option<i64>,

    /// Use the squared Euclidean local metric instead of Manhattan
    #[arg(long, default_value_t = false)]
    squared: bool,

    /// Z-normalize series before alignment
    #[arg(long, default_value_t = false)]
    normalize: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Align two series end to end and report the optimal warping path
    Align {
        /// Path to the first series CSV file
        #[arg(long)]
        x: PathBuf,

        /// Path to the second series CSV file
        #[arg(long)]
        y: PathBuf,

        /// Report the distance only, skipping path reconstruction and artifacts
        #[arg(long, default_value_t = false)]
        dist_only: bool,

        /// Include the full accumulated cost matrix in the JSON artifact
        #[arg(long, default_value_t = false)]
        emit_matrix: bool,

        /// Run name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        run: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        warping: WarpingArgs,
    },

    /// Locate the best match for a query inside a longer reference series
    Match {
        /// Path to the query series CSV file
        #[arg(long)]
        query: PathBuf,

        /// Path to the reference series CSV file
        #[arg(long)]
        reference: PathBuf,

        /// Z-normalize query and reference before matching
        #[arg(long, default_value_t = false)]
        normalize: bool,

        /// Run name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        run: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Compute the pairwise distance matrix over a collection of series
    Pairwise {
        /// Path to the collection CSV file
        #[arg(long)]
        data: PathBuf,

        /// Run name for output files (must match [a-zA-Z0-9_-]+)
        #[arg(long)]
        run: String,

        /// Output directory for result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        #[command(flatten)]
        warping: WarpingArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct AlignOutput {
    run: String,
    constraint: String,
    metric: String,
    n: usize,
    m: usize,
    distance: f64,
    path_len: Option<usize>,
}

#[derive(Serialize)]
struct MatchOutput {
    run: String,
    n: usize,
    m: usize,
    distance: f64,
    start: usize,
    end: usize,
    path_len: usize,
}

#[derive(Serialize)]
struct PairwiseOutput {
    run: String,
    constraint: String,
    metric: String,
    n_series: usize,
    n_pairs: usize,
}

fn build_constraint(kind: ConstraintKind, radius: Option<i64>) -> Result<WarpConstraint> {
    let constraint = match kind {
        ConstraintKind::None => WarpConstraint::Unconstrained,
        ConstraintKind::SakoeChiba => WarpConstraint::sakoe_chiba(radius)?,
        ConstraintKind::Itakura => WarpConstraint::Itakura,
    };
    Ok(constraint)
}

fn build_metric(squared: bool) -> PointMetric {
    if squared {
        PointMetric::SquaredEuclidean
    } else {
        PointMetric::Manhattan
    }
}

fn preprocess_series(series: Series, normalize: bool) -> Result<Series> {
    let mut result = series;
    if normalize {
        result = z_normalize(&result).context("z-normalization failed")?;
        info!(n = result.len(), "z-normalized series");
    }
    Ok(result)
}

fn preprocess_collection(series: Vec<Series>, normalize: bool) -> Result<Vec<Series>> {
    let mut result = series;
    if normalize {
        result = z_normalize_batch(&result).context("z-normalization failed")?;
        info!(n = result.len(), "z-normalized series");
    }
    Ok(result)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Configure Rayon thread pool
    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    match cli.command {
        Command::Align {
            x,
            y,
            dist_only,
            emit_matrix,
            run,
            output_dir,
            warping,
        } => {
            let constraint = build_constraint(warping.constraint, warping.radius)?;
            let run_name = RunName::new(run.clone())?;
            let dtw = Dtw::with_constraint(constraint).with_metric(build_metric(warping.squared));

            // Read both series
            let x_series = SeriesReader::new(&x)
                .read()
                .context("failed to read --x CSV")?;
            let y_series = SeriesReader::new(&y)
                .read()
                .context("failed to read --y CSV")?;
            info!(n = x_series.len(), m = y_series.len(), "series loaded");

            // Preprocess series
            let x_series = preprocess_series(x_series, warping.normalize)?;
            let y_series = preprocess_series(y_series, warping.normalize)?;

            let n = x_series.len();
            let m = y_series.len();

            if dist_only {
                // Rolling-buffer distance, no grid and no artifact
                let distance = dtw
                    .distance(x_series.as_view(), y_series.as_view())
                    .context("alignment failed")?;

                let output = AlignOutput {
                    run,
                    constraint: dtw.constraint().to_string(),
                    metric: dtw.metric().to_string(),
                    n,
                    m,
                    distance: distance.value(),
                    path_len: None,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                let alignment = dtw
                    .align(x_series.as_view(), y_series.as_view())
                    .context("alignment failed")?;

                // Write JSON artifact
                let writer = ResultWriter::new(&output_dir, run_name)?;
                writer.write_alignment(&dtw, &alignment, emit_matrix)?;

                // Build and print stdout summary
                let output = AlignOutput {
                    run,
                    constraint: dtw.constraint().to_string(),
                    metric: dtw.metric().to_string(),
                    n,
                    m,
                    distance: alignment.distance().value(),
                    path_len: Some(alignment.path().len()),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }

        Command::Match {
            query,
            reference,
            normalize,
            run,
            output_dir,
        } => {
            let run_name = RunName::new(run.clone())?;

            // Read query and reference
            let query_series = SeriesReader::new(&query)
                .read()
                .context("failed to read --query CSV")?;
            let reference_series = SeriesReader::new(&reference)
                .read()
                .context("failed to read --reference CSV")?;
            info!(
                n = query_series.len(),
                m = reference_series.len(),
                "query and reference loaded"
            );

            // Preprocess series
            let query_series = preprocess_series(query_series, normalize)?;
            let reference_series = preprocess_series(reference_series, normalize)?;

            // Locate the best-matching window
            let result = subsequence_align(query_series.as_view(), reference_series.as_view())
                .context("subsequence matching failed")?;
            info!(
                distance = result.distance().value(),
                start = result.start(),
                end = result.end(),
                "match located"
            );

            // Write JSON artifact
            let writer = ResultWriter::new(&output_dir, run_name)?;
            writer.write_match(&result)?;

            // Build and print stdout summary
            let output = MatchOutput {
                run,
                n: query_series.len(),
                m: reference_series.len(),
                distance: result.distance().value(),
                start: result.start(),
                end: result.end(),
                path_len: result.path().len(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Pairwise {
            data,
            run,
            output_dir,
            warping,
        } => {
            let constraint = build_constraint(warping.constraint, warping.radius)?;
            let run_name = RunName::new(run.clone())?;
            let dtw = Dtw::with_constraint(constraint).with_metric(build_metric(warping.squared));

            // Read collection
            let collection = CollectionReader::new(&data)
                .read()
                .context("failed to read input CSV")?;
            info!(n_series = collection.series.len(), "collection loaded");

            let ids = collection.ids;

            // Preprocess series
            let series = preprocess_collection(collection.series, warping.normalize)?;

            // Compute all pairwise distances
            let distances = dtw
                .pairwise(&series)
                .context("pairwise computation failed")?;

            // Write JSON artifact
            let writer = ResultWriter::new(&output_dir, run_name)?;
            writer.write_pairwise(&dtw, &ids, &distances)?;

            // Build and print stdout summary
            let n_series = distances.len();
            let output = PairwiseOutput {
                run,
                constraint: dtw.constraint().to_string(),
                metric: dtw.metric().to_string(),
                n_series,
                n_pairs: n_series * n_series.saturating_sub(1) / 2,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
