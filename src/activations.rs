//! Activation functions used by the network's forward and backward passes.
use ndarray::Array2;
use std::fmt;

/// Logistic function `1 / (1 + exp(-a))`.
pub fn sigmoid(a: f64) -> f64 {
    1.0 / (1.0 + (-a).exp())
}

/// Derivative of the logistic function, `σ(a) * (1 - σ(a))`.
pub fn sigmoid_prime(a: f64) -> f64 {
    let s = sigmoid(a);
    s * (1.0 - s)
}

/// Trait for elementwise activation functions.
pub trait Activation: fmt::Debug + Send + Sync {
    fn apply(&self, x: f64) -> f64;
    fn derivative(&self, x: f64) -> f64;

    /// Apply the activation to every element of `m`.
    fn apply_matrix(&self, m: &Array2<f64>) -> Array2<f64> {
        m.mapv(|v| self.apply(v))
    }

    /// Apply the derivative to every element of `m`.
    fn derivative_matrix(&self, m: &Array2<f64>) -> Array2<f64> {
        m.mapv(|v| self.derivative(v))
    }
}

/// Sigmoid: 1 / (1 + exp(-x))
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

impl Activation for Sigmoid {
    fn apply(&self, x: f64) -> f64 {
        sigmoid(x)
    }
    fn derivative(&self, x: f64) -> f64 {
        sigmoid_prime(x)
    }
}
