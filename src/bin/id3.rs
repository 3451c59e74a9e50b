use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use id3_forest::config::{Algorithm, DataSetPreset, Discretization, DEFAULT_FOLDS, DEFAULT_NTREE};
use id3_forest::data::dataset::Dataset;
use id3_forest::data::reader::read_rows;
use id3_forest::experiment::Experiment;

#[derive(Parser)]
#[command(name = "id3")]
#[command(about = "ID3 decision trees and random forests with k-fold cross-validation")]
#[command(version)]
struct Cli {
    /// Data set to evaluate: benchmark, diabetes, wine, ionosphere or cancer
    #[arg(long)]
    data_set: Option<DataSetPreset>,

    /// Learner: id3_decision_tree or id3_random_forest
    #[arg(long, default_value = "id3_decision_tree")]
    algorithm: Algorithm,

    /// Discretization: mean, quartiles or information_gain
    #[arg(long, default_value = "mean")]
    discretization: Discretization,

    /// Number of trees in a random forest
    #[arg(long, default_value_t = DEFAULT_NTREE)]
    ntree: usize,

    /// Number of cross-validation folds
    #[arg(long, default_value_t = DEFAULT_FOLDS)]
    folds: usize,

    /// RNG seed for reproducible folds and bootstrap samples
    #[arg(long)]
    seed: Option<u64>,

    /// Attributes drawn per forest tree (all when omitted)
    #[arg(long)]
    max_features: Option<usize>,

    /// Directory holding the data set files
    #[arg(long, default_value = "sets")]
    sets_dir: PathBuf,

    /// Log file, truncated on every run
    #[arg(long, default_value = "output.log")]
    log_file: PathBuf,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("failed to create log file {}", cli.log_file.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .init();

    let Some(preset) = cli.data_set else {
        println!("Nothing to do here...");
        return Ok(());
    };

    let experiment = Experiment::new(cli.algorithm, cli.discretization)?
        .with_ntree(cli.ntree)?
        .with_folds(cli.folds)?
        .with_max_features(cli.max_features)?
        .with_seed(cli.seed);

    let path = preset.path(&cli.sets_dir);
    let rows = read_rows(&path, preset.delimiter)
        .with_context(|| format!("failed to read data set {}", path.display()))?;
    let dataset = Dataset::new(rows, preset.class_attribute, preset.id_attribute)
        .with_context(|| format!("invalid data set {}", preset.name))?;
    info!(
        data_set = preset.name,
        rows = dataset.nrows(),
        attributes = dataset.attributes().len(),
        classes = dataset.classes().len(),
        "dataset loaded"
    );

    println!("Discretizing and processing...");
    let report = experiment.run(&dataset)?;

    println!("{}", report.statistics);
    if report.tree.is_some() {
        println!("The induced tree is in {}", cli.log_file.display());
    } else {
        println!("See the log output in {}", cli.log_file.display());
    }
    Ok(())
}
