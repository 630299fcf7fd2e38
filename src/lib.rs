//! A small toolkit for introductory data analysis: CSV tables, summary
//! statistics, histograms and scatter plots, ordered train/test splits, and a
//! two-layer sigmoid network trained by backpropagation.
//!
//! - `DataFrame` loaded from CSV with per-column type inference
//! - Mean / median / mode / empirical quantiles and a `describe` summary
//! - Whole-batch gradient descent on a one-hidden-layer network
//! - PNG histograms and scatter plots

pub mod activations;
pub mod config;
pub mod dataframe;
pub mod datasets;
pub mod layers;
pub mod logging;
pub mod loss;
pub mod metrics;
pub mod network;
pub mod plot;
pub mod split;
pub mod stats;
pub mod utils;

pub use activations::{sigmoid, sigmoid_prime, Activation, Sigmoid};
pub use config::NetworkOverrides;
pub use dataframe::{DataFrame, Series, Values};
pub use datasets::{load_inputs_and_labels, Dataset};
pub use layers::DenseLayer;
pub use loss::mse_loss;
pub use metrics::{confusion_matrix, subset_accuracy};
pub use network::{sum_along_axis, NetworkConfig, NetworkError, NeuralNet};
pub use plot::{save_histogram, save_scatter, Histogram};
pub use split::train_test_split;
pub use utils::{column_summary, print_confusion_matrix, print_model_summary};
