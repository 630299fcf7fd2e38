use anyhow::Result;
use clap::Parser;
use ml_basics::plot::{column_histogram, histograms_for, DEFAULT_BINS};
use ml_basics::{logging, DataFrame};
use std::path::PathBuf;
use tracing::info;

/// Render a histogram of one column, then normalized histograms of every
/// column of a second dataset.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// CSV holding the single column to plot
    #[arg(long, value_name = "PATH", default_value = "simple.csv")]
    simple: PathBuf,
    /// Column of `--simple` to plot
    #[arg(long, default_value = "Number")]
    column: String,
    /// CSV whose columns are all plotted
    #[arg(long, value_name = "PATH", default_value = "iris.csv")]
    dataset: PathBuf,
    /// Column of `--dataset` that is skipped
    #[arg(long, default_value = "variety")]
    skip: String,
    #[arg(short, long, default_value_t = DEFAULT_BINS)]
    bins: usize,
    /// Directory receiving the PNG files
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    logging::init_logging()?;
    let args = Cli::parse();

    let df = DataFrame::from_path(&args.simple)?;
    column_histogram(&df, &args.column, args.bins, &args.out_dir)?;

    let df = DataFrame::from_path(&args.dataset)?;
    let written = histograms_for(&df, &args.skip, args.bins, &args.out_dir)?;
    info!(files = written.len(), "histograms done");
    Ok(())
}
