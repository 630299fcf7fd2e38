use anyhow::Result;
use clap::Parser;
use ml_basics::plot::{histograms_for, scatters_against, DEFAULT_BINS};
use ml_basics::{logging, DataFrame};
use std::path::PathBuf;

/// Describe a dataset, plot a histogram of every predictor and a scatter plot
/// of every column against the response column.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[arg(short, long, value_name = "PATH", default_value = "advertising.csv")]
    input: PathBuf,
    /// Response column plotted on the y axis
    #[arg(short, long, default_value = "Sales")]
    response: String,
    #[arg(short, long, default_value_t = DEFAULT_BINS)]
    bins: usize,
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    logging::init_logging()?;
    let args = Cli::parse();

    let df = DataFrame::from_path(&args.input)?;
    println!("{}", df.describe()?);

    histograms_for(&df, &args.response, args.bins, &args.out_dir)?;
    scatters_against(&df, &args.response, &args.out_dir)?;
    Ok(())
}
