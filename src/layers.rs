//! Dense layer holding a weight matrix, a bias row and an activation function.
use crate::activations::Activation;
use ndarray::Array2;
use rand::Rng;
use std::sync::Arc;

/// A fully-connected (dense) layer operating on whole batches.
///
/// `weights` is `[input_size x output_size]` and `bias` is `[1 x output_size]`,
/// so a batch `x` of shape `[rows x input_size]` maps to `x·W + b`.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    pub weights: Array2<f64>,
    pub bias: Array2<f64>,
    pub activation: Arc<dyn Activation>,
}

impl DenseLayer {
    /// Create a layer with every weight and bias drawn uniformly from `[0, 1)`.
    pub fn random<R: Rng>(
        input_size: usize,
        output_size: usize,
        activation: Arc<dyn Activation>,
        rng: &mut R,
    ) -> Self {
        let weights = Array2::from_shape_simple_fn((input_size, output_size), || rng.gen::<f64>());
        let bias = Array2::from_shape_simple_fn((1, output_size), || rng.gen::<f64>());
        Self {
            weights,
            bias,
            activation,
        }
    }

    /// Forward pass: pre-activations `z = x·W + b` (bias broadcast per row) and
    /// activations `a = act(z)`.
    pub fn forward(&self, input: &Array2<f64>) -> (Array2<f64>, Array2<f64>) {
        let z = input.dot(&self.weights) + &self.bias;
        let a = self.activation.apply_matrix(&z);
        (z, a)
    }

    /// Gradient-ascent step: `W += rate * dW`, `b += rate * db`.
    pub fn apply_adjustment(&mut self, d_weights: &Array2<f64>, d_bias: &Array2<f64>, rate: f64) {
        self.weights.scaled_add(rate, d_weights);
        self.bias.scaled_add(rate, d_bias);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activations::{sigmoid, Sigmoid};
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_init_is_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let layer = DenseLayer::random(4, 3, Arc::new(Sigmoid), &mut rng);
        assert_eq!(layer.weights.dim(), (4, 3));
        assert_eq!(layer.bias.dim(), (1, 3));
        assert!(layer
            .weights
            .iter()
            .chain(layer.bias.iter())
            .all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn forward_broadcasts_bias_per_row() {
        let layer = DenseLayer {
            weights: array![[1.0, 0.0], [0.0, 1.0]],
            bias: array![[0.5, -0.5]],
            activation: Arc::new(Sigmoid),
        };
        let x = array![[1.0, 2.0], [3.0, 4.0]];
        let (z, a) = layer.forward(&x);
        assert_eq!(z, array![[1.5, 1.5], [3.5, 3.5]]);
        assert_eq!(a[[1, 0]], sigmoid(3.5));
    }

    #[test]
    fn adjustment_scales_by_rate() {
        let mut layer = DenseLayer {
            weights: array![[1.0]],
            bias: array![[0.0]],
            activation: Arc::new(Sigmoid),
        };
        layer.apply_adjustment(&array![[2.0]], &array![[4.0]], 0.5);
        assert_eq!(layer.weights, array![[2.0]]);
        assert_eq!(layer.bias, array![[2.0]]);
    }
}
