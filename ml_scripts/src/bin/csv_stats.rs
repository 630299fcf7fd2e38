use anyhow::Result;
use clap::Parser;
use ml_basics::{column_summary, logging, DataFrame};
use std::path::PathBuf;

/// Print a CSV table, summary statistics of one column, and a description of
/// every column.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// CSV file with a header row
    #[arg(short, long, value_name = "PATH", default_value = "simple.csv")]
    input: PathBuf,
    /// Column to summarize
    #[arg(short, long, default_value = "Number")]
    column: String,
}

fn main() -> Result<()> {
    logging::init_logging()?;
    let args = Cli::parse();

    let df = DataFrame::from_path(&args.input)?;
    println!("{}", df);

    let col = df.col(&args.column)?;
    println!("{}", column_summary(col)?);

    println!("{}", df.describe()?);
    Ok(())
}
