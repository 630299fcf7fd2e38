//! Two-layer feed-forward network trained by whole-batch backpropagation.
use crate::activations::{Activation, Sigmoid};
use crate::layers::DenseLayer;
use crate::loss::mse_loss;
use ndarray::{Array2, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised by the network and its matrix helpers.
#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("invalid axis {0}, must be 0 or 1")]
    InvalidAxis(usize),
    #[error("the network has no trained weights or biases")]
    Untrained,
    #[error("{what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Architecture and learning parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    pub input_count: usize,
    pub output_count: usize,
    pub hidden_count: usize,
    /// Number of full-batch gradient steps.
    pub steps: usize,
    pub rate: f64,
    /// Seed for parameter initialization; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            input_count: 4,
            output_count: 3,
            hidden_count: 3,
            steps: 5000,
            rate: 0.3,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
struct Parameters {
    hidden: DenseLayer,
    output: DenseLayer,
}

/// A sigmoid network with one hidden layer.
///
/// Parameters only exist after [`NeuralNet::train`] succeeds; until then
/// [`NeuralNet::predict`] fails with [`NetworkError::Untrained`].
#[derive(Debug, Clone)]
pub struct NeuralNet {
    config: NetworkConfig,
    params: Option<Parameters>,
}

/// Sums a matrix along one axis, preserving the other dimension.
///
/// Axis 0 yields a `[1 x cols]` row of column sums, axis 1 a `[rows x 1]`
/// column of row sums.
pub fn sum_along_axis(axis: usize, m: &Array2<f64>) -> Result<Array2<f64>, NetworkError> {
    match axis {
        0 => Ok(m.sum_axis(Axis(0)).insert_axis(Axis(0))),
        1 => Ok(m.sum_axis(Axis(1)).insert_axis(Axis(1))),
        other => Err(NetworkError::InvalidAxis(other)),
    }
}

impl NeuralNet {
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            config,
            params: None,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn is_trained(&self) -> bool {
        self.params.is_some()
    }

    /// Initialize parameters and fit them to `x` / `y`.
    ///
    /// `x` is `[rows x input_count]`, `y` is the one-hot `[rows x output_count]`
    /// label matrix. Any previously trained parameters are replaced.
    pub fn train(&mut self, x: &Array2<f64>, y: &Array2<f64>) -> Result<(), NetworkError> {
        self.check_inputs(x)?;
        check_dim("label columns", self.config.output_count, y.ncols())?;
        check_dim("label rows", x.nrows(), y.nrows())?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let activation: Arc<dyn Activation> = Arc::new(Sigmoid);
        let mut params = Parameters {
            hidden: DenseLayer::random(
                self.config.input_count,
                self.config.hidden_count,
                activation.clone(),
                &mut rng,
            ),
            output: DenseLayer::random(
                self.config.hidden_count,
                self.config.output_count,
                activation,
                &mut rng,
            ),
        };

        info!(
            rows = x.nrows(),
            hidden = self.config.hidden_count,
            steps = self.config.steps,
            rate = self.config.rate,
            "training network"
        );
        self.backpropagate(x, y, &mut params)?;
        self.params = Some(params);
        Ok(())
    }

    fn backpropagate(
        &self,
        x: &Array2<f64>,
        y: &Array2<f64>,
        params: &mut Parameters,
    ) -> Result<(), NetworkError> {
        let rate = self.config.rate;
        let x_t = x.t();
        for step in 0..self.config.steps {
            let (_, hidden_act) = params.hidden.forward(x);
            let (_, output) = params.output.forward(&hidden_act);

            let network_error = y - &output;

            // The derivative is taken at the activations, not the pre-activations.
            let slope_output = params.output.activation.derivative_matrix(&output);
            let slope_hidden = params.hidden.activation.derivative_matrix(&hidden_act);

            let d_output = network_error * &slope_output;
            let error_at_hidden = d_output.dot(&params.output.weights.t());
            let d_hidden = error_at_hidden * &slope_hidden;

            let w_output_adj = hidden_act.t().dot(&d_output);
            let b_output_adj = sum_along_axis(0, &d_output)?;
            params
                .output
                .apply_adjustment(&w_output_adj, &b_output_adj, rate);

            let w_hidden_adj = x_t.dot(&d_hidden);
            let b_hidden_adj = sum_along_axis(0, &d_hidden)?;
            params
                .hidden
                .apply_adjustment(&w_hidden_adj, &b_hidden_adj, rate);

            if step % 1000 == 0 {
                debug!(step, loss = mse_loss(&output, y), "backpropagation step");
            }
        }
        Ok(())
    }

    /// Run the forward pass of a trained network over `x`.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array2<f64>, NetworkError> {
        let params = self.params.as_ref().ok_or(NetworkError::Untrained)?;
        self.check_inputs(x)?;
        let (_, hidden_act) = params.hidden.forward(x);
        let (_, output) = params.output.forward(&hidden_act);
        Ok(output)
    }

    fn check_inputs(&self, x: &Array2<f64>) -> Result<(), NetworkError> {
        check_dim("input columns", self.config.input_count, x.ncols())
    }
}

fn check_dim(what: &'static str, expected: usize, actual: usize) -> Result<(), NetworkError> {
    if expected == actual {
        Ok(())
    } else {
        Err(NetworkError::ShapeMismatch {
            what,
            expected,
            actual,
        })
    }
}

impl fmt::Display for NeuralNet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NeuralNet: [{}, {}, {}] ({})",
            self.config.input_count,
            self.config.hidden_count,
            self.config.output_count,
            if self.is_trained() { "trained" } else { "untrained" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::subset_accuracy;
    use ndarray::array;

    fn toy_data() -> (Array2<f64>, Array2<f64>) {
        // Three well separated classes keyed on which feature is large.
        let x = array![
            [1.0, 0.0, 0.0, 0.1],
            [0.9, 0.1, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.1],
            [0.1, 0.9, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.1],
            [0.0, 0.1, 0.9, 0.0],
        ];
        let y = array![
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
        ];
        (x, y)
    }

    fn seeded(steps: usize) -> NetworkConfig {
        NetworkConfig {
            hidden_count: 5,
            steps,
            rate: 0.5,
            seed: Some(42),
            ..NetworkConfig::default()
        }
    }

    #[test]
    fn predict_untrained_fails() {
        let net = NeuralNet::new(NetworkConfig::default());
        let x = Array2::zeros((2, 4));
        assert_eq!(net.predict(&x), Err(NetworkError::Untrained));
    }

    #[test]
    fn sum_along_axis_both_axes() {
        let m = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        assert_eq!(sum_along_axis(0, &m).unwrap(), array![[5.0, 7.0, 9.0]]);
        assert_eq!(sum_along_axis(1, &m).unwrap(), array![[6.0], [15.0]]);
    }

    #[test]
    fn sum_along_axis_rejects_other_axes() {
        let m = array![[1.0]];
        assert_eq!(sum_along_axis(2, &m), Err(NetworkError::InvalidAxis(2)));
    }

    #[test]
    fn training_is_deterministic_with_seed() {
        let (x, y) = toy_data();
        let mut a = NeuralNet::new(seeded(200));
        let mut b = NeuralNet::new(seeded(200));
        a.train(&x, &y).unwrap();
        b.train(&x, &y).unwrap();
        assert_eq!(a.predict(&x).unwrap(), b.predict(&x).unwrap());
    }

    #[test]
    fn outputs_are_in_unit_interval() {
        let (x, y) = toy_data();
        let mut net = NeuralNet::new(seeded(50));
        net.train(&x, &y).unwrap();
        let out = net.predict(&x).unwrap();
        assert_eq!(out.dim(), (6, 3));
        assert!(out.iter().all(|&v| v > 0.0 && v < 1.0));
    }

    #[test]
    fn learns_separable_classes() {
        let (x, y) = toy_data();
        let mut net = NeuralNet::new(seeded(5000));
        net.train(&x, &y).unwrap();
        let out = net.predict(&x).unwrap();
        let acc = subset_accuracy(&out, &y).unwrap();
        assert!(acc >= 5.0 / 6.0, "accuracy {}", acc);
    }

    #[test]
    fn zero_steps_keeps_initial_parameters() {
        let (x, y) = toy_data();
        let mut net = NeuralNet::new(seeded(0));
        assert_eq!(net.config().hidden_count, 5);
        net.train(&x, &y).unwrap();
        assert!(net.is_trained());
        assert!(net.predict(&x).is_ok());
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let mut net = NeuralNet::new(NetworkConfig::default());
        let x = Array2::zeros((2, 5));
        let y = Array2::zeros((2, 3));
        assert_eq!(
            net.train(&x, &y),
            Err(NetworkError::ShapeMismatch {
                what: "input columns",
                expected: 4,
                actual: 5
            })
        );
        let x = Array2::zeros((2, 4));
        let y = Array2::zeros((3, 3));
        assert!(matches!(
            net.train(&x, &y),
            Err(NetworkError::ShapeMismatch { what: "label rows", .. })
        ));
        assert!(!net.is_trained());
    }
}
