use anyhow::{Context, Result};
use clap::Parser;
use ml_basics::{
    confusion_matrix, load_inputs_and_labels, logging, print_confusion_matrix,
    print_model_summary, subset_accuracy, NetworkConfig, NetworkOverrides, NeuralNet,
};
use std::path::PathBuf;

/// Train a two-layer sigmoid network and report its accuracy on a test set.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Training CSV: input columns followed by one-hot label columns
    #[arg(long, value_name = "PATH", default_value = "train.csv")]
    train: PathBuf,
    /// Test CSV with the same layout
    #[arg(long, value_name = "PATH", default_value = "test.csv")]
    test: PathBuf,
    /// YAML file overriding the default hyperparameters
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for weight initialization
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    logging::init_logging()?;
    let args = Cli::parse();

    let file = match &args.config {
        Some(path) => NetworkOverrides::from_path(path)?,
        None => NetworkOverrides::default(),
    };
    let cli = NetworkOverrides {
        seed: args.seed,
        ..Default::default()
    };
    let config = file.merge(cli).apply(NetworkConfig::default());

    let training = load_inputs_and_labels(&args.train, config.input_count, config.output_count)?;

    let mut network = NeuralNet::new(config);
    network
        .train(&training.inputs, &training.labels)
        .context("error while backpropagating")?;
    print_model_summary(&network);

    let config = network.config();
    let testing = load_inputs_and_labels(&args.test, config.input_count, config.output_count)?;
    let predictions = network.predict(&testing.inputs)?;

    let accuracy = subset_accuracy(&predictions, &testing.labels)?;
    print_confusion_matrix(&confusion_matrix(&predictions, &testing.labels));
    println!("\nAccuracy = {:0.2}\n", accuracy);
    Ok(())
}
