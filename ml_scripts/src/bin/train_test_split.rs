use anyhow::Result;
use clap::Parser;
use ml_basics::split::export_split;
use ml_basics::{logging, DataFrame};
use std::path::PathBuf;

/// Write the first four fifths of a CSV to `training.csv` and the rest to
/// `test.csv`.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[arg(short, long, value_name = "PATH", default_value = "advertising.csv")]
    input: PathBuf,
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    logging::init_logging()?;
    let args = Cli::parse();

    let df = DataFrame::from_path(&args.input)?;
    export_split(&df, &args.out_dir)?;
    Ok(())
}
